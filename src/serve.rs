//! Purpose: Provide the charset-aware JSON echo server behind `httpjson serve`.
//! Exports: `ServeConfig`, `serve`.
//! Role: Axum-based loopback server exercising the codec on both HTTP directions.
//! Invariants: Request bodies are decoded with their declared charset before handling.
//! Invariants: Responses are encoded in the charset the route's content type names.
//! Invariants: Loopback-only unless explicitly allowed.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use std::future::IntoFuture;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::time::Duration;
use tower_http::trace::TraceLayer;

use httpjson::api::{
    self, CharsetJson, DEFAULT_CONTENT_TYPE, Error, ErrorKind, write_response,
};

#[derive(Clone, Debug)]
pub struct ServeConfig {
    pub bind: SocketAddr,
    pub value: Option<Value>,
    pub content_type: String,
    pub allow_non_loopback: bool,
    pub max_body_bytes: u64,
}

#[derive(Clone)]
struct AppState {
    value: Option<Value>,
    content_type: String,
}

pub async fn serve(config: ServeConfig) -> Result<(), Error> {
    validate_config(&config)?;

    let max_body_bytes: usize = config
        .max_body_bytes
        .try_into()
        .map_err(|_| Error::new(ErrorKind::Usage).with_message("--max-body-bytes is too large"))?;

    let state = Arc::new(AppState {
        value: config.value,
        content_type: config.content_type,
    });

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/echo", post(echo))
        .route("/value", get(configured_value))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to bind server")
                .with_source(err)
        })?;
    let local_addr = listener.local_addr().unwrap_or(config.bind);
    tracing::info!(bind = %local_addr, "listening");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("server failed")
                    .with_source(err)
            })?;
        }
        _ = shutdown_signal() => {
            tracing::info!("shutting down");
            let _ = shutdown_tx.send(());
            match tokio::time::timeout(Duration::from_secs(10), &mut server).await {
                Ok(result) => result.map_err(|err| {
                    Error::new(ErrorKind::Io)
                        .with_message("server failed")
                        .with_source(err)
                })?,
                Err(_) => {
                    return Err(Error::new(ErrorKind::Io).with_message("server shutdown timed out"));
                }
            }
        }
    };
    Ok(())
}

fn is_loopback(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(addr) => addr.is_loopback(),
        IpAddr::V6(addr) => addr.is_loopback(),
    }
}

fn validate_config(config: &ServeConfig) -> Result<(), Error> {
    if !is_loopback(config.bind.ip()) && !config.allow_non_loopback {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("non-loopback bind requires explicit opt-in")
            .with_hint("Re-run with --allow-non-loopback or use a loopback address."));
    }

    if config.max_body_bytes == 0 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("--max-body-bytes must be greater than zero")
            .with_hint("Use a positive value like 1048576."));
    }

    if config.max_body_bytes > usize::MAX as u64 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("--max-body-bytes exceeds platform limits")
            .with_hint("Use a smaller value that fits in memory."));
    }

    if !config.content_type.is_empty() {
        let media_type = api::parse_media_type(&config.content_type).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("invalid --content-type: {err}"))
                .with_hint("Use a media type like application/json;charset=utf-8.")
        })?;
        if let Some(charset) = media_type.param("charset") {
            api::resolve(charset)?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}

fn respond(result: Result<Response, Error>) -> Response {
    result.unwrap_or_else(|err| {
        tracing::warn!(kind = ?err.kind(), error = %err, "response failed");
        api::error_response(&err)
    })
}

async fn healthz() -> Response {
    respond(write_response(
        StatusCode::OK,
        DEFAULT_CONTENT_TYPE,
        Some(&json!({ "ok": true })),
    ))
}

/// Answers with the request's value, encoded in the request's own content type.
async fn echo(headers: HeaderMap, CharsetJson(value): CharsetJson<Value>) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    respond(write_response(StatusCode::OK, content_type, Some(&value)))
}

async fn configured_value(State(state): State<Arc<AppState>>) -> Response {
    match state.value.as_ref() {
        Some(value) => respond(write_response(
            StatusCode::OK,
            &state.content_type,
            Some(value),
        )),
        None => api::error_response(
            &Error::new(ErrorKind::Usage).with_message("no value configured; start with --value"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{ServeConfig, validate_config};
    use httpjson::api::ErrorKind;

    fn config(bind: &str) -> ServeConfig {
        ServeConfig {
            bind: bind.parse().expect("bind"),
            value: None,
            content_type: String::new(),
            allow_non_loopback: false,
            max_body_bytes: 1024 * 1024,
        }
    }

    #[test]
    fn non_loopback_requires_allow_flag() {
        let err = validate_config(&config("0.0.0.0:0")).expect_err("expected usage error");
        assert_eq!(err.kind(), ErrorKind::Usage);

        let mut allowed = config("0.0.0.0:0");
        allowed.allow_non_loopback = true;
        validate_config(&allowed).expect("config ok");
    }

    #[test]
    fn body_limit_must_be_positive() {
        let mut config = config("127.0.0.1:0");
        config.max_body_bytes = 0;
        let err = validate_config(&config).expect_err("expected usage error");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn content_type_charset_is_checked_up_front() {
        let mut config = config("127.0.0.1:0");
        config.content_type = "application/json;charset=iso-8859-1".to_string();
        validate_config(&config).expect("config ok");

        config.content_type = "application/json;charset=no-such".to_string();
        let err = validate_config(&config).expect_err("unknown charset");
        assert_eq!(err.kind(), ErrorKind::UnknownCharset);

        config.content_type = "application/json;charset=OSD_EBCDIC_DF03_IRV".to_string();
        let err = validate_config(&config).expect_err("unsupported charset");
        assert_eq!(err.kind(), ErrorKind::UnsupportedCharset);

        config.content_type = "application json".to_string();
        let err = validate_config(&config).expect_err("bad media type");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}
