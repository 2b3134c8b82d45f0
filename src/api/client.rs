//! Purpose: Blocking HTTP client that sends and receives charset-encoded JSON bodies.
//! Exports: `Client`, `get`, `send`.
//! Role: Thin glue between `ureq` and the codec; no retries, no response rewriting.
//! Invariants: Non-2xx responses become `ErrorKind::Status` errors carrying the raw body.
//! Invariants: 2xx responses must pass the JSON content-type predicate before decoding.
//! Invariants: Transport and body-read failures surface as `ErrorKind::Io` with the source kept.
#![allow(clippy::result_large_err)]

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ApiResult;
use super::message::{PreparedRequest, marshal_request, read_body, unmarshal_body};
use crate::core::error::{Error, ErrorKind, ResponseError};
use crate::core::media_type::is_json_content_type;

type JsonPredicate = dyn Fn(&str) -> bool + Send + Sync;

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    agent: ureq::Agent,
    is_json_content_type: Arc<JsonPredicate>,
}

impl Client {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ClientInner {
                agent: ureq::AgentBuilder::new().build(),
                is_json_content_type: Arc::new(is_json_content_type),
            }),
        }
    }

    /// Bounds each request; the deadline is enforced by the transport, not the codec.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        self.with_agent(agent)
    }

    pub fn with_agent(mut self, agent: ureq::Agent) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.agent = agent;
        } else {
            self.inner = Arc::new(ClientInner {
                agent,
                is_json_content_type: self.inner.is_json_content_type.clone(),
            });
        }
        self
    }

    /// Replaces the check deciding whether a successful response carries JSON.
    pub fn with_json_content_type<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let predicate: Arc<JsonPredicate> = Arc::new(predicate);
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.is_json_content_type = predicate;
        } else {
            self.inner = Arc::new(ClientInner {
                agent: self.inner.agent.clone(),
                is_json_content_type: predicate,
            });
        }
        self
    }

    pub fn get<R>(&self, url: &str) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        self.send::<(), R>("GET", url, "", None)
    }

    /// Sends `value` (if any) encoded per `content_type` and decodes the JSON response.
    pub fn send<T, R>(
        &self,
        method: &str,
        url: &str,
        content_type: &str,
        value: Option<&T>,
    ) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = marshal_request(method, url, content_type, value)?;
        self.execute(&request)
    }

    pub fn execute<R>(&self, request: &PreparedRequest) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let mut call = self
            .inner
            .agent
            .request_url(request.method(), request.url());
        let response = match request.body() {
            Some(body) => {
                if let Some(content_type) = request.content_type() {
                    call = call.set("Content-Type", content_type);
                }
                call.send_bytes(body)
            }
            None => call.call(),
        };

        let response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => return Err(response_error(resp)),
            Err(ureq::Error::Transport(err)) => {
                return Err(Error::new(ErrorKind::Io)
                    .with_message("request failed")
                    .with_source(err));
            }
        };
        if !(200..300).contains(&response.status()) {
            return Err(response_error(response));
        }

        let content_type = response.header("Content-Type").unwrap_or_default().to_string();
        if !(self.inner.is_json_content_type)(&content_type) {
            return Err(Error::new(ErrorKind::ContentType)
                .with_message(format!("unsupported Content-Type {content_type:?}")));
        }
        let body = read_body(response.into_reader())?;
        unmarshal_body(Some(&content_type), &body)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

fn default_client() -> &'static Client {
    static DEFAULT: OnceLock<Client> = OnceLock::new();
    DEFAULT.get_or_init(Client::new)
}

/// Fetches `url` with the default client and decodes the JSON response.
pub fn get<R>(url: &str) -> ApiResult<R>
where
    R: DeserializeOwned,
{
    default_client().get(url)
}

pub fn send<T, R>(method: &str, url: &str, content_type: &str, value: Option<&T>) -> ApiResult<R>
where
    T: Serialize + ?Sized,
    R: DeserializeOwned,
{
    default_client().send(method, url, content_type, value)
}

fn response_error(response: ureq::Response) -> Error {
    let status = response.status();
    let reason = response.status_text().to_string();
    let content_type = response.header("Content-Type").map(str::to_string);
    tracing::debug!(status, "non-success response");
    match read_body(response.into_reader()) {
        Ok(body) => Error::from(ResponseError {
            status,
            reason,
            content_type,
            body,
        }),
        Err(err) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::core::error::ErrorKind;
    use serde_json::Value;

    #[test]
    fn marshal_errors_surface_before_any_io() {
        let client = Client::new();
        let err = client
            .send::<_, Value>(
                "POST",
                "http://127.0.0.1:9/",
                "application/json;charset=made-up",
                Some(&serde_json::json!({"s": "☺"})),
            )
            .expect_err("unknown charset");
        assert_eq!(err.kind(), ErrorKind::UnknownCharset);
    }

    #[test]
    fn invalid_url_is_usage_error() {
        let err = Client::new().get::<Value>(":::").expect_err("url");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn shared_client_keeps_predicate_when_agent_changes() {
        let client = Client::new().with_json_content_type(|ct| ct == "x-application/test");
        let shared = client.clone();
        let rebuilt = shared.with_timeout(std::time::Duration::from_secs(1));
        assert!((rebuilt.inner.is_json_content_type)("x-application/test"));
        assert!(!(rebuilt.inner.is_json_content_type)("application/json"));
        assert!((client.inner.is_json_content_type)("x-application/test"));
    }
}
