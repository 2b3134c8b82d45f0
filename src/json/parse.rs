//! Purpose: Provide the runtime JSON encode/decode entrypoints and failure categories.
//! Exports: `to_vec`, `from_slice`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Errors are returned as `serde_json::Error` untouched.
//! Invariants: Category labels are stable; hints never echo payload bytes.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub(crate) fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Truncated,
    Type,
    DepthLimit,
    Io,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Truncated => "truncated",
            ParseFailureCategory::Type => "type",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Io => ParseFailureCategory::Io,
        Category::Eof => ParseFailureCategory::Truncated,
        Category::Data => ParseFailureCategory::Type,
        Category::Syntax if err.to_string().starts_with("recursion limit exceeded") => {
            ParseFailureCategory::DepthLimit
        }
        Category::Syntax => ParseFailureCategory::Syntax,
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    let mut hint = format!("parse category: {}", category.label());
    if err.line() > 0 {
        hint.push_str(&format!("; line {} column {}", err.line(), err.column()));
    }
    hint.push_str(&format!("; context: {context}"));
    if category == ParseFailureCategory::Syntax {
        hint.push_str("; check that the declared charset matches the body bytes");
    }
    hint
}
