//! Purpose: Charset-aware JSON marshal and unmarshal.
//! Exports: `marshal`, `unmarshal`, `DEFAULT_CHARSET`, `DEFAULT_CONTENT_TYPE`.
//! Role: The whole external surface of the codec; HTTP glue only calls these two.
//! Invariants: UTF-8 is a pass-through on both paths (byte-identical to plain JSON).
//! Invariants: Serializer, resolver, and transcoder errors are returned unchanged.
//! Invariants: Unmarshal applies the raw decoder only; JSON escapes are left to the parser.

use std::borrow::Cow;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::charset::{self, is_utf8_name};
use crate::core::error::Error;
use crate::core::transcode::transcode;
use crate::json::parse;

/// Content type used when a caller supplies none at all.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Charset used by `marshal` when a content type carries no charset parameter.
pub const DEFAULT_CHARSET: &str = "us-ascii";

pub fn marshal<T>(value: &T, charset: &str) -> Result<Vec<u8>, Error>
where
    T: Serialize + ?Sized,
{
    let charset = if charset.is_empty() {
        DEFAULT_CHARSET
    } else {
        charset
    };
    let body = parse::to_vec(value).map_err(Error::json)?;
    if is_utf8_name(charset) {
        return Ok(body);
    }
    let resolved = charset::resolve(charset)?;
    tracing::debug!(charset = resolved.name(), bytes = body.len(), "marshal");
    transcode(&body, resolved.new_encoder())
}

pub fn unmarshal<T>(bytes: &[u8], charset: &str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let text: Cow<'_, [u8]> = if is_utf8_name(charset) {
        Cow::Borrowed(bytes)
    } else {
        let resolved = charset::resolve(charset)?;
        tracing::debug!(charset = resolved.name(), bytes = bytes.len(), "unmarshal");
        match resolved.decode(bytes)? {
            Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
            Cow::Owned(text) => Cow::Owned(text.into_bytes()),
        }
    };
    parse::from_slice(&text).map_err(|err| {
        let hint = parse::hint_for_error(&err, "unmarshal");
        Error::json(err).with_hint(hint)
    })
}

#[cfg(test)]
mod tests {
    use super::{marshal, unmarshal};
    use crate::core::error::ErrorKind;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
    struct Sample {
        s: String,
    }

    fn sample(s: &str) -> Sample {
        Sample { s: s.to_string() }
    }

    #[test]
    fn utf8_marshal_is_plain_json() {
        let value = sample("test message ☺");
        let expected = serde_json::to_vec(&value).expect("json");
        assert_eq!(marshal(&value, "utf-8").expect("utf-8"), expected);
        assert_eq!(marshal(&value, "UTF-8").expect("UTF-8"), expected);
    }

    #[test]
    fn empty_charset_marshals_as_us_ascii() {
        let out = marshal(&sample("☺"), "").expect("marshal");
        assert_eq!(out, br#"{"s":"\u263a"}"#);
    }

    #[test]
    fn supplementary_chars_become_surrogate_pairs() {
        let out = marshal(&sample("😂 hello"), "us-ascii").expect("marshal");
        assert_eq!(out, br#"{"s":"\ud83d\ude02 hello"}"#);
    }

    #[test]
    fn latin1_keeps_representable_chars() {
        let out = marshal(&sample("£☺"), "iso-8859-1").expect("marshal");
        assert_eq!(out, b"{\"s\":\"\xa3\\u263a\"}");
    }

    #[test]
    fn latin5_escapes_euro_and_decodes_c1_controls() {
        assert_eq!(marshal(&"€", "iso-8859-9").expect("marshal"), br#""\u20ac""#);
        assert_eq!(marshal(&"ğİ", "latin5").expect("marshal"), b"\"\xf0\xdd\"");

        let value: String = unmarshal(b"\"\x80\"", "iso-8859-9").expect("unmarshal");
        assert_eq!(value, "\u{80}");
    }

    #[test]
    fn ebcdic_output_encodes_structure_and_escapes() {
        let out = marshal(&sample("a☺"), "IBM037").expect("marshal");
        // {"s":"a\u263a"} in code page 037.
        assert_eq!(
            out,
            b"\xc0\x7f\xa2\x7f\x7a\x7f\x81\xe0\xa4\xf2\xf6\xf3\x81\x7f\xd0"
        );
    }

    #[test]
    fn serialize_errors_win_over_charset_errors() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1);
        let err = marshal(&map, "OSD_EBCDIC_DF03_IRV").expect_err("key must be a string");
        assert_eq!(err.kind(), ErrorKind::Json);
    }

    #[test]
    fn charset_errors_keep_their_kind() {
        let err = marshal(&sample("☺"), "no-such").expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::UnknownCharset);
        let err = marshal(&sample("☺"), "OSD_EBCDIC_DF03_IRV").expect_err("unsupported");
        assert_eq!(err.kind(), ErrorKind::UnsupportedCharset);

        let err = unmarshal::<Sample>(b"{}", "not-known").expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::UnknownCharset);
        let err = unmarshal::<Sample>(b"{}", "OSD_EBCDIC_DF03_IRV").expect_err("unsupported");
        assert_eq!(err.kind(), ErrorKind::UnsupportedCharset);
    }

    #[test]
    fn unmarshal_decodes_before_parsing() {
        let value: Sample = unmarshal(b"{\"s\":\"\\u263a\xa3\"}", "iso-8859-1").expect("latin1");
        assert_eq!(value, sample("☺£"));

        let value: Sample = unmarshal(br#"{"s":"\u263a"}"#, "us-ascii").expect("ascii");
        assert_eq!(value, sample("☺"));

        let value: Sample = unmarshal("{\"s\":\"☺\"}".as_bytes(), "").expect("default");
        assert_eq!(value, sample("☺"));
    }

    #[test]
    fn unmarshal_reports_bad_json_and_bad_bytes() {
        let err = unmarshal::<Sample>(b"{", "utf-8").expect_err("bad json");
        assert_eq!(err.kind(), ErrorKind::Json);
        assert!(err.hint().is_some_and(|hint| hint.contains("parse category: truncated")));

        let err = unmarshal::<Sample>(&[b'{', b'"', 0x82], "shift_jis").expect_err("truncated");
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn round_trips_through_supported_charsets() {
        let value = sample("plain £ é ☺ 😂 \"quoted\" \\ back");
        for charset in [
            "utf-8",
            "us-ascii",
            "iso-8859-1",
            "iso-8859-15",
            "windows-1252",
            "koi8-r",
            "shift_jis",
            "euc-jp",
            "iso-2022-jp",
            "gb18030",
            "big5",
            "euc-kr",
            "utf-16be",
            "utf-16le",
            "iso-8859-9",
            "ibm037",
            "ibm1047",
            "ibm437",
            "ibm850",
            "ibm852",
        ] {
            let bytes = marshal(&value, charset).expect(charset);
            let back: Sample = unmarshal(&bytes, charset).expect(charset);
            assert_eq!(back, value, "charset {charset}");
        }
    }
}
