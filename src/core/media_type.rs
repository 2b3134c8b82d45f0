//! Purpose: Parse Content-Type header values into a media type plus parameters.
//! Exports: `MediaType`, `parse`, `is_json_content_type`, `charset_param`.
//! Role: The only place header strings are interpreted; codec callers only see charset names.
//! Invariants: Media types and parameter names are lowercased; parameter values are not.
//! Invariants: `charset_param` never fails; unparsable headers mean "no charset specified".

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MediaType {
    essence: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// The lowercased `type/subtype` without parameters.
    pub fn essence(&self) -> &str {
        &self.essence
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_json(&self) -> bool {
        self.essence == "application/json"
            || self.essence == "text/json"
            || self.essence.ends_with("+json")
    }
}

pub fn parse(value: &str) -> Result<MediaType, Error> {
    let (head, rest) = match value.find(';') {
        Some(idx) => value.split_at(idx),
        None => (value, ""),
    };
    let essence = head.trim().to_ascii_lowercase();
    check_essence(&essence)?;
    let params = parse_params(rest)?;
    Ok(MediaType { essence, params })
}

/// Whether a Content-Type names a JSON MIME type (WHATWG MIME Sniffing, JSON group).
pub fn is_json_content_type(content_type: &str) -> bool {
    parse(content_type).is_ok_and(|media_type| media_type.is_json())
}

pub fn charset_param(content_type: &str) -> String {
    parse(content_type)
        .ok()
        .and_then(|media_type| media_type.param("charset").map(str::to_string))
        .unwrap_or_default()
}

fn check_essence(essence: &str) -> Result<(), Error> {
    let (kind, rest) = take_token(essence);
    if kind.is_empty() {
        return Err(invalid("mime: no media type"));
    }
    if rest.is_empty() {
        return Ok(());
    }
    let Some(subtype) = rest.strip_prefix('/') else {
        return Err(invalid("mime: expected slash after first token"));
    };
    let (subtype, rest) = take_token(subtype);
    if subtype.is_empty() || !rest.is_empty() {
        return Err(invalid("mime: expected token after slash"));
    }
    Ok(())
}

fn parse_params(mut rest: &str) -> Result<Vec<(String, String)>, Error> {
    let mut params: Vec<(String, String)> = Vec::new();
    loop {
        rest = trim_space(rest);
        if rest.is_empty() {
            return Ok(params);
        }
        let Some(after) = rest.strip_prefix(';') else {
            return Err(invalid("mime: invalid media parameter"));
        };
        let after = trim_space(after);
        if after.is_empty() {
            return Ok(params);
        }
        let (name, after) = take_token(after);
        if name.is_empty() {
            return Err(invalid("mime: invalid media parameter"));
        }
        let Some(after) = trim_space(after).strip_prefix('=') else {
            return Err(invalid("mime: invalid media parameter"));
        };
        let (value, after) = take_value(trim_space(after))?;
        let name = name.to_ascii_lowercase();
        if params.iter().any(|(key, _)| *key == name) {
            return Err(invalid("mime: duplicate parameter name"));
        }
        params.push((name, value));
        rest = after;
    }
}

fn take_value(input: &str) -> Result<(String, &str), Error> {
    let Some(quoted) = input.strip_prefix('"') else {
        let (token, rest) = take_token(input);
        if token.is_empty() {
            return Err(invalid("mime: invalid media parameter"));
        }
        return Ok((token.to_string(), rest));
    };
    let mut value = String::new();
    let mut chars = quoted.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Ok((value, &quoted[idx + 1..])),
            '\\' => match chars.next() {
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            _ => value.push(ch),
        }
    }
    Err(invalid("mime: unterminated quoted parameter value"))
}

fn take_token(input: &str) -> (&str, &str) {
    let end = input
        .find(|ch: char| !is_token_char(ch))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(ch)
}

fn trim_space(input: &str) -> &str {
    input.trim_start_matches([' ', '\t'])
}

fn invalid(message: &str) -> Error {
    Error::new(ErrorKind::ContentType).with_message(message)
}
