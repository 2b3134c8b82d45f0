//! Purpose: Prepare charset-encoded JSON request bodies and decode JSON message bodies.
//! Exports: `PreparedRequest`, `marshal_request`, `unmarshal_body`, `read_body`.
//! Role: Transport-agnostic half of the HTTP boundary shared by client and server.
//! Invariants: An empty content type means `DEFAULT_CONTENT_TYPE`; a content type
//! without a charset marshals as us-ascii and unmarshals as utf-8.
//! Invariants: Requests without a value carry neither body nor Content-Type.
//! Invariants: Bodies are owned bytes so a request can be replayed.
#![allow(clippy::result_large_err)]

use std::io::Read;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ApiResult;
use crate::core::codec::{self, DEFAULT_CONTENT_TYPE};
use crate::core::error::{Error, ErrorKind};
use crate::core::media_type::charset_param;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreparedRequest {
    method: String,
    url: Url,
    content_type: Option<String>,
    body: Option<Vec<u8>>,
}

impl PreparedRequest {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn content_length(&self) -> u64 {
        self.body.as_ref().map_or(0, |body| body.len() as u64)
    }
}

/// Builds a request whose body is the JSON encoding of `value` in the content type's charset.
pub fn marshal_request<T>(
    method: &str,
    url: &str,
    content_type: &str,
    value: Option<&T>,
) -> ApiResult<PreparedRequest>
where
    T: Serialize + ?Sized,
{
    let content_type = if content_type.is_empty() {
        DEFAULT_CONTENT_TYPE
    } else {
        content_type
    };
    let body = match value {
        Some(value) => Some(codec::marshal(value, &charset_param(content_type))?),
        None => None,
    };
    if !is_valid_method(method) {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("invalid method {method:?}")));
    }
    let url = Url::parse(url).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("invalid request url {url:?}: {err}"))
            .with_source(err)
    })?;
    Ok(PreparedRequest {
        method: method.to_string(),
        url,
        content_type: body.as_ref().map(|_| content_type.to_string()),
        body,
    })
}

/// Decodes a JSON body using the charset named by its Content-Type, if any.
pub fn unmarshal_body<T>(content_type: Option<&str>, body: &[u8]) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let charset = content_type.map(charset_param).unwrap_or_default();
    codec::unmarshal(body, &charset)
}

pub fn read_body(mut reader: impl Read) -> ApiResult<Vec<u8>> {
    let mut body = Vec::new();
    reader.read_to_end(&mut body).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message(err.to_string())
            .with_source(err)
    })?;
    Ok(body)
}

fn is_valid_method(method: &str) -> bool {
    !method.is_empty()
        && method
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&byte))
}
