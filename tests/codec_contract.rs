//! Purpose: Contract tests for the public codec surface.
//! Exports: None (integration test module).
//! Role: Pin the observable marshal/unmarshal behavior callers rely on.
//! Invariants: Only `httpjson::api` items are used; no internal helpers.

use httpjson::api::{self, Charset, ErrorKind, Transcoder};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize, PartialEq, Serialize)]
struct Message {
    s: String,
}

fn message(s: &str) -> Message {
    Message { s: s.to_string() }
}

#[test]
fn default_content_type_marshals_plain_utf8() {
    let req = api::marshal_request("POST", "http://localhost/", "", Some(&message("☺")))
        .expect("request");
    assert_eq!(req.body(), Some("{\"s\":\"☺\"}".as_bytes()));
}

#[test]
fn utf8_output_matches_plain_serialization() {
    let value = json!({"a": [1, 2.5, null, true], "b": {"c": "£ ☺ 😂 \u{0}"}});
    let plain = serde_json::to_vec(&value).expect("json");
    assert_eq!(api::marshal(&value, "utf-8").expect("marshal"), plain);
}

#[test]
fn unrepresentable_code_points_become_escapes() {
    assert_eq!(
        api::marshal(&message("☺"), "us-ascii").expect("ascii"),
        br#"{"s":"\u263a"}"#
    );
    assert_eq!(
        api::marshal(&message("😂"), "us-ascii").expect("ascii"),
        br#"{"s":"\ud83d\ude02"}"#
    );
}

#[test]
fn representable_code_points_use_native_bytes() {
    assert_eq!(
        api::marshal(&message("£"), "iso-8859-1").expect("latin1"),
        b"{\"s\":\"\xa3\"}"
    );
}

#[test]
fn latin1_body_with_escape_decodes() {
    let value: Message = api::unmarshal(b"{\"s\":\"\\u263a\xa3\"}", "iso-8859-1").expect("decode");
    assert_eq!(value, message("☺£"));
}

#[test]
fn unknown_and_unsupported_names_are_distinct() {
    let unknown = api::resolve("x-not-a-charset").expect_err("unknown");
    let unsupported = api::resolve("OSD_EBCDIC_DF03_IRV").expect_err("unsupported");
    assert_eq!(unknown.kind(), ErrorKind::UnknownCharset);
    assert_eq!(unsupported.kind(), ErrorKind::UnsupportedCharset);
    assert_ne!(unknown.kind(), unsupported.kind());
}

#[test]
fn truncated_multibyte_input_is_malformed() {
    for (charset, bytes) in [
        ("shift_jis", &b"[\"\x82"[..]),
        ("euc-jp", &b"[\"\xa4"[..]),
        ("utf-16be", &b"\x00[\x00"[..]),
    ] {
        let err = api::unmarshal::<Value>(bytes, charset).expect_err(charset);
        assert_eq!(err.kind(), ErrorKind::Malformed, "charset {charset}");
    }
}

#[test]
fn round_trip_holds_for_nested_values() {
    let value = json!({
        "text": "Grüße, 世界! ☺ 😂",
        "list": ["£", "€", "あ", "\"", "\\", "\n"],
        "nested": {"n": -1.5e3, "ok": false},
    });
    for charset in [
        "us-ascii",
        "iso-8859-1",
        "iso-8859-9",
        "windows-1251",
        "big5",
        "euc-kr",
        "utf-16le",
        "ibm1047",
    ] {
        let bytes = api::marshal(&value, charset).expect(charset);
        let back: Value = api::unmarshal(&bytes, charset).expect(charset);
        assert_eq!(back, value, "charset {charset}");
    }
}

#[test]
fn streaming_transcoder_matches_one_shot_marshal() {
    let value = message("snow ☃ and 😂 and £");
    let plain = serde_json::to_vec(&value).expect("json");
    let charset = api::resolve("iso-8859-1").expect("latin1");
    assert_eq!(charset, Charset::Latin1);

    let mut transcoder = Transcoder::new(charset.new_encoder());
    let mut out = Vec::new();
    for chunk in plain.chunks(3) {
        transcoder.push(chunk, &mut out).expect("push");
    }
    transcoder.finish(&mut out).expect("finish");
    assert_eq!(out, api::marshal(&value, "iso-8859-1").expect("marshal"));
}
