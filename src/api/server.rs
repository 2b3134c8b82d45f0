//! Purpose: axum helpers for reading and writing charset-encoded JSON bodies.
//! Exports: `CharsetJson`, `write_response`, `error_response`.
//! Role: Server half of the HTTP boundary; mirrors the client's content-type rules.
//! Invariants: Request bodies decode with the request's charset (utf-8 when absent).
//! Invariants: Responses without a value carry neither body nor Content-Type.

use axum::async_trait;
use axum::body::Body;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ApiResult;
use super::message::unmarshal_body;
use crate::core::codec::{self, DEFAULT_CONTENT_TYPE};
use crate::core::error::{Error, ErrorKind};
use crate::core::media_type::charset_param;

/// Extractor that decodes a JSON request body from its declared charset.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CharsetJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for CharsetJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        unmarshal_body(content_type.as_deref(), &body)
            .map(CharsetJson)
            .map_err(|err| {
                tracing::warn!(kind = ?err.kind(), error = %err, "rejected request body");
                error_response(&err)
            })
    }
}

/// Builds a response whose body is `value` encoded per `content_type`.
pub fn write_response<T>(
    status: StatusCode,
    content_type: &str,
    value: Option<&T>,
) -> ApiResult<Response>
where
    T: Serialize + ?Sized,
{
    let Some(value) = value else {
        return Ok(status.into_response());
    };
    let content_type = if content_type.is_empty() {
        DEFAULT_CONTENT_TYPE
    } else {
        content_type
    };
    let body = codec::marshal(value, &charset_param(content_type))?;
    let header_value = HeaderValue::from_str(content_type).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("content type is not a valid header value")
            .with_source(err)
    })?;
    let length = body.len();
    let mut response = (status, Body::from(body)).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, header_value);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    Ok(response)
}

pub fn error_response(err: &Error) -> Response {
    let status = match err.kind() {
        ErrorKind::UnknownCharset | ErrorKind::UnsupportedCharset => {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        }
        ErrorKind::Json | ErrorKind::Malformed | ErrorKind::ContentType | ErrorKind::Usage => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::Status => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let mut response = (status, format!("{err}\n")).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain;charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::{CharsetJson, error_response, write_response};
    use crate::core::error::{Error, ErrorKind};
    use axum::body::{Body, to_bytes};
    use axum::extract::{FromRequest, Request};
    use axum::http::{StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec()
    }

    fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn write_response_defaults_to_utf8() {
        let response =
            write_response(StatusCode::OK, "", Some(&json!({"s": "☺"}))).expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_str(&response, header::CONTENT_TYPE),
            Some("application/json;charset=utf-8")
        );
        let expected = "{\"s\":\"☺\"}".as_bytes();
        let expected_len = expected.len().to_string();
        assert_eq!(
            header_str(&response, header::CONTENT_LENGTH),
            Some(expected_len.as_str())
        );
        assert_eq!(body_bytes(response).await, expected);
    }

    #[tokio::test]
    async fn write_response_encodes_declared_charset() {
        let response = write_response(
            StatusCode::CREATED,
            "application/json;charset=us-ascii",
            Some(&json!({"s": "☺"})),
        )
        .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_bytes(response).await, br#"{"s":"\u263a"}"#);
    }

    #[tokio::test]
    async fn write_response_without_value_is_empty() {
        let response =
            write_response::<Value>(StatusCode::NO_CONTENT, "", None).expect("response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(header_str(&response, header::CONTENT_TYPE), None);
        assert!(body_bytes(response).await.is_empty());
    }

    #[test]
    fn write_response_propagates_charset_errors() {
        let err = write_response(
            StatusCode::OK,
            "application/json;charset=no-such",
            Some(&json!({})),
        )
        .expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::UnknownCharset);
    }

    #[tokio::test]
    async fn extractor_decodes_request_charset() {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json;charset=iso-8859-1")
            .body(Body::from(b"{\"s\":\"\\u263a\xa3\"}".to_vec()))
            .expect("request");
        let CharsetJson(value) = CharsetJson::<Value>::from_request(request, &())
            .await
            .expect("extract");
        assert_eq!(value, json!({"s": "☺£"}));
    }

    #[tokio::test]
    async fn extractor_rejects_unknown_charset() {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json;charset=not-known")
            .body(Body::from("{}"))
            .expect("request");
        let rejection = CharsetJson::<Value>::from_request(request, &())
            .await
            .expect_err("rejected");
        assert_eq!(rejection.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn error_response_maps_kinds() {
        let cases = [
            (ErrorKind::UnsupportedCharset, StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (ErrorKind::Json, StatusCode::BAD_REQUEST),
            (ErrorKind::Malformed, StatusCode::BAD_REQUEST),
            (ErrorKind::Io, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            assert_eq!(error_response(&Error::new(kind)).status(), status);
        }
    }
}
