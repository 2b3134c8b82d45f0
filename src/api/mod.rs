//! Purpose: Define the stable public Rust API boundary for httpjson.
//! Exports: Codec operations, charset resolution, request/response helpers, client, server.
//! Role: Public, additive-only surface over `core`; callers should not need `core` paths.
//! Invariants: This module is the only public path most callers need.
//! Invariants: Error kinds stay distinguishable across every layer re-exported here.

mod client;
mod message;
mod server;

pub use crate::core::charset::{Charset, CharsetEncoder, EncodeStatus, resolve};
pub use crate::core::code_page::CodePage;
pub use crate::core::codec::{DEFAULT_CHARSET, DEFAULT_CONTENT_TYPE, marshal, unmarshal};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind, ResponseError};
pub use crate::core::media_type::{
    MediaType, charset_param, is_json_content_type, parse as parse_media_type,
};
pub use crate::core::transcode::{
    Carry, JsonTransform, Step, Transcoder, Transformed, transcode,
};
pub use client::{Client, get, send};
pub use message::{PreparedRequest, marshal_request, read_body, unmarshal_body};
pub use server::{CharsetJson, error_response, write_response};

pub type ApiResult<T> = Result<T, Error>;
