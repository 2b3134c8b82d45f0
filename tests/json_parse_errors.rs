//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by CLI decode diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Invariants: Tests avoid payload leakage; assertions target category/hint text only.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_truncation() {
    let syntax_err = parse::from_slice::<Value>(br#"{"a":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_slice::<Value>(b"{").unwrap_err();
    assert_eq!(
        parse::categorize_error(&eof_err),
        ParseFailureCategory::Truncated
    );
}

#[test]
fn category_mapping_handles_type_and_depth() {
    let type_err = parse::from_slice::<Vec<u8>>(br#"{"a":1}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&type_err),
        ParseFailureCategory::Type
    );

    let deep = "[".repeat(200);
    let depth_err = parse::from_slice::<Value>(deep.as_bytes()).unwrap_err();
    assert_eq!(
        parse::categorize_error(&depth_err),
        ParseFailureCategory::DepthLimit
    );
}

#[test]
fn latin1_bytes_read_as_utf8_are_syntax_errors() {
    let err = parse::from_slice::<Value>(b"{\"s\":\"\xa3\"}").unwrap_err();
    assert_eq!(parse::categorize_error(&err), ParseFailureCategory::Syntax);
}

#[test]
fn hint_contains_category_and_context() {
    let err = parse::from_slice::<Value>(br#"{"a":}"#).unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: syntax"));
    assert!(hint.contains("context: test.context"));
    assert!(hint.contains("declared charset"));
}

#[test]
fn to_vec_matches_serde_json() {
    let value = serde_json::json!({"s": "☺"});
    assert_eq!(
        parse::to_vec(&value).expect("encode"),
        serde_json::to_vec(&value).expect("encode")
    );
}
