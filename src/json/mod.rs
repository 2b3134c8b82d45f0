//! Purpose: Internal JSON (de)serialization boundary used by the codec.
//! Exports: `parse` module with encode/decode helpers and failure categories.
//! Role: Single seam for the serde_json backend so callsites avoid ad hoc JSON calls.
//! Invariants: Codec JSON encoding and decoding goes through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
