//! Purpose: End-to-end tests for the charset-aware HTTP client against `httpjson serve`.
//! Exports: None (integration test module).
//! Role: Validate both HTTP directions across TCP with non-UTF-8 charsets.
//! Invariants: Uses a loopback-only server spawned from the built binary.
//! Invariants: Bounded waits avoid test flakiness.
//! Invariants: Server processes are cleaned up on drop.

use httpjson::api::{self, Client, ErrorKind};
use serde_json::{Value, json};
use std::io::Read;
use std::net::{SocketAddr, TcpListener};
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};
use std::thread::sleep;
use std::time::{Duration, Instant};

type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

static SERVER_LOCK: Mutex<()> = Mutex::new(());

struct TestServer {
    child: Child,
    base_url: String,
    _server_guard: MutexGuard<'static, ()>,
}

impl TestServer {
    fn start() -> TestResult<Self> {
        Self::start_with_args(&[])
    }

    fn start_with_args(args: &[&str]) -> TestResult<Self> {
        let guard = SERVER_LOCK
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        let mut last_err: Option<Box<dyn std::error::Error>> = None;
        for _attempt in 0..3 {
            let port = pick_port()?;
            let bind = format!("127.0.0.1:{port}");
            let base_url = format!("http://{bind}");

            let mut child = Command::new(env!("CARGO_BIN_EXE_httpjson"))
                .arg("serve")
                .arg("--bind")
                .arg(&bind)
                .args(args)
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .spawn()?;

            match wait_for_server(&mut child, bind.parse()?) {
                Ok(()) => {
                    return Ok(Self {
                        child,
                        base_url,
                        _server_guard: guard,
                    });
                }
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    last_err = Some(err);
                    sleep(Duration::from_millis(30));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| "server failed to start".into()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn healthz_via_default_client() -> TestResult<()> {
    let server = TestServer::start()?;
    let value: Value = api::get(&server.url("/healthz"))?;
    assert_eq!(value, json!({"ok": true}));
    Ok(())
}

#[test]
fn configured_value_is_served_in_declared_charset() -> TestResult<()> {
    let server = TestServer::start_with_args(&[
        "--value",
        r#"{"s":"£☺😂"}"#,
        "--content-type",
        "application/json;charset=iso-8859-1",
    ])?;

    let raw = ureq::get(&server.url("/value")).call()?;
    assert_eq!(
        raw.header("Content-Type"),
        Some("application/json;charset=iso-8859-1")
    );
    let mut body = Vec::new();
    raw.into_reader().read_to_end(&mut body)?;
    assert_eq!(body, b"{\"s\":\"\xa3\\u263a\\ud83d\\ude02\"}");

    let value: Value = Client::new().get(&server.url("/value"))?;
    assert_eq!(value, json!({"s": "£☺😂"}));
    Ok(())
}

#[test]
fn echo_round_trips_through_request_charsets() -> TestResult<()> {
    let server = TestServer::start()?;
    let client = Client::new().with_timeout(Duration::from_secs(5));
    let payload = json!({"s": "plain £ é ☺ あ 😂 \"q\""});
    for content_type in [
        "",
        "application/json",
        "application/json;charset=utf-8",
        "application/json;charset=us-ascii",
        "application/json;charset=iso-8859-1",
        "application/json;charset=windows-1252",
        "application/json;charset=shift_jis",
        "application/json;charset=euc-kr",
        "application/json;charset=utf-16le",
        "application/json; charset=\"GB18030\"",
    ] {
        let echoed: Value =
            client.send("POST", &server.url("/echo"), content_type, Some(&payload))?;
        assert_eq!(echoed, payload, "content type {content_type:?}");
    }
    Ok(())
}

#[test]
fn echo_preserves_request_bytes() -> TestResult<()> {
    let server = TestServer::start()?;
    let body = b"{\"s\":\"\xa3\\u263a\"}";
    let resp = ureq::post(&server.url("/echo"))
        .set("Content-Type", "application/json;charset=latin1")
        .send_bytes(body)?;
    assert_eq!(resp.header("Content-Type"), Some("application/json;charset=latin1"));
    let mut echoed = Vec::new();
    resp.into_reader().read_to_end(&mut echoed)?;
    assert_eq!(echoed, body);
    Ok(())
}

#[test]
fn server_rejects_unknown_request_charset() -> TestResult<()> {
    let server = TestServer::start()?;
    let result = ureq::post(&server.url("/echo"))
        .set("Content-Type", "application/json;charset=no-such")
        .send_bytes(b"{}");
    let Err(ureq::Error::Status(status, resp)) = result else {
        return Err("expected status error".into());
    };
    assert_eq!(status, 415);
    assert_eq!(resp.header("Content-Type"), Some("text/plain;charset=utf-8"));
    let text = resp.into_string()?;
    assert!(text.contains("invalid encoding name"), "body: {text}");
    Ok(())
}

#[test]
fn non_success_response_becomes_status_error() -> TestResult<()> {
    let server = TestServer::start()?;
    let err = Client::new()
        .get::<Value>(&server.url("/value"))
        .expect_err("no value configured");
    assert_eq!(err.kind(), ErrorKind::Status);
    let response = err.response().expect("response attached");
    assert_eq!(response.status, 400);
    assert_eq!(err.to_string(), "no value configured; start with --value");
    Ok(())
}

#[test]
fn content_type_predicate_gates_successful_responses() -> TestResult<()> {
    let server = TestServer::start_with_args(&[
        "--value",
        r#"{"s":"☺"}"#,
        "--content-type",
        "text/plain;charset=utf-8",
    ])?;

    let err = Client::new()
        .get::<Value>(&server.url("/value"))
        .expect_err("text/plain is not json");
    assert_eq!(err.kind(), ErrorKind::ContentType);
    assert_eq!(
        err.to_string(),
        "unsupported Content-Type \"text/plain;charset=utf-8\""
    );

    let lenient = Client::new().with_json_content_type(|ct| ct.starts_with("text/plain"));
    let value: Value = lenient.get(&server.url("/value"))?;
    assert_eq!(value, json!({"s": "☺"}));
    Ok(())
}

#[test]
fn transport_failures_are_io_errors() -> TestResult<()> {
    let port = pick_port()?;
    let err = Client::new()
        .get::<Value>(&format!("http://127.0.0.1:{port}/healthz"))
        .expect_err("nothing listening");
    assert_eq!(err.kind(), ErrorKind::Io);
    Ok(())
}

fn pick_port() -> TestResult<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

fn wait_for_server(child: &mut Child, addr: SocketAddr) -> TestResult<()> {
    let url = format!("http://{addr}/healthz");
    let start = Instant::now();
    loop {
        if let Ok(resp) = ureq::get(&url).call() {
            if resp.status() == 200 {
                return Ok(());
            }
        }
        if let Some(status) = child.try_wait()? {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            let detail = stderr.trim();
            return Err(format!(
                "server exited before ready (status: {status}, stderr: {})",
                if detail.is_empty() { "<empty>" } else { detail }
            )
            .into());
        }
        if start.elapsed() > Duration::from_secs(8) {
            return Err("server did not start in time".into());
        }
        sleep(Duration::from_millis(20));
    }
}
