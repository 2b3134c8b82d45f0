//! Purpose: Library crate for transporting JSON values in HTTP bodies in any MIME charset.
//! Exports: `core` (charset resolver, JSON-safe transcoder, codec, errors) and `api`.
//! Role: Backs the `httpjson` binary and is usable directly by HTTP clients and servers.
//! Invariants: `api` is the stable surface; `core` modules stay pure (no I/O).
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
mod json;
