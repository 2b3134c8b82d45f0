//! Purpose: `httpjson` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, writes results on stdout.
//! Invariants: `encode` writes raw charset bytes; every other command writes JSON.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Diagnostics (tracing) go to stderr so stdout stays machine-readable.
#![allow(clippy::result_large_err)]

use std::io::{self, IsTerminal, Write};
use std::net::SocketAddr;
use std::time::Duration;

use clap::error::ErrorKind as ClapErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod serve;

use httpjson::api::{
    self, Client, DEFAULT_CONTENT_TYPE, Error, ErrorKind, read_body, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let default_filter = match cli.command {
        Command::Serve(_) => "info",
        _ => "warn",
    };
    init_tracing(default_filter);

    dispatch_command(cli.command, color_mode)
        .map_err(add_charset_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "httpjson",
    version,
    about = "Carry JSON in HTTP bodies encoded in any MIME charset",
    long_about = None,
    after_help = r#"EXAMPLES
  $ echo '{"s":"£☺"}' | httpjson encode --charset iso-8859-1 | httpjson decode --charset iso-8859-1
  $ httpjson resolve latin1
  $ httpjson serve --bind 127.0.0.1:8080 --value '{"s":"☺"}' --content-type 'application/json;charset=us-ascii'
  $ httpjson get http://127.0.0.1:8080/value"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Encode one JSON value from stdin into a charset (default us-ascii)")]
    Encode {
        #[arg(long, default_value = "", help = "Target charset name or alias")]
        charset: String,
    },
    #[command(about = "Decode charset bytes from stdin into one JSON value (default utf-8)")]
    Decode {
        #[arg(long, default_value = "", help = "Source charset name or alias")]
        charset: String,
    },
    #[command(about = "Resolve a charset name or alias to its canonical name")]
    Resolve {
        #[arg(help = "Charset name or alias (case-insensitive)")]
        name: String,
    },
    #[command(about = "GET a URL and print the decoded JSON response")]
    Get {
        url: String,
        #[arg(long, help = "Request timeout in milliseconds")]
        timeout_ms: Option<u64>,
    },
    #[command(about = "Send a JSON body with any method and print the decoded JSON response")]
    Send {
        method: String,
        url: String,
        #[arg(
            long,
            default_value = "",
            help = "Request Content-Type (default application/json;charset=utf-8)"
        )]
        content_type: String,
        #[arg(long, help = "JSON value to send; omit to send no body")]
        data: Option<String>,
        #[arg(long, help = "Request timeout in milliseconds")]
        timeout_ms: Option<u64>,
    },
    #[command(about = "Run a charset-aware JSON echo server")]
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:9780", help = "Address to listen on")]
    bind: SocketAddr,
    #[arg(long, help = "JSON value served from GET /value")]
    value: Option<String>,
    #[arg(
        long,
        default_value = DEFAULT_CONTENT_TYPE,
        help = "Content-Type used for GET /value responses"
    )]
    content_type: String,
    #[arg(long, help = "Permit binding to a non-loopback address")]
    allow_non_loopback: bool,
    #[arg(long, default_value_t = 1024 * 1024, help = "Maximum request body size")]
    max_body_bytes: u64,
}

fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Encode { charset } => {
            let input = read_body(io::stdin().lock())?;
            let value: Value = parse_input_json(&input)?;
            let encoded = api::marshal(&value, &charset)?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&encoded)
                .and_then(|()| stdout.flush())
                .map_err(|err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write stdout")
                        .with_source(err)
                })?;
            Ok(RunOutcome::ok())
        }
        Command::Decode { charset } => {
            let input = read_body(io::stdin().lock())?;
            let value: Value = api::unmarshal(&input, &charset)?;
            emit_json(value, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Resolve { name } => {
            let charset = api::resolve(&name)?;
            emit_json(
                json!({
                    "input": name,
                    "name": charset.name(),
                    "utf8": charset.is_utf8(),
                }),
                color_mode,
            );
            Ok(RunOutcome::ok())
        }
        Command::Get { url, timeout_ms } => {
            let value: Value = build_client(timeout_ms).get(&url)?;
            emit_json(value, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Send {
            method,
            url,
            content_type,
            data,
            timeout_ms,
        } => {
            let data = data.as_deref().map(parse_inline_json).transpose()?;
            let value: Value =
                build_client(timeout_ms).send(&method, &url, &content_type, data.as_ref())?;
            emit_json(value, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Serve(args) => {
            let config = serve_config_from_args(args)?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to start runtime")
                        .with_source(err)
                })?;
            runtime.block_on(serve::serve(config))?;
            Ok(RunOutcome::ok())
        }
    }
}

fn build_client(timeout_ms: Option<u64>) -> Client {
    match timeout_ms {
        Some(ms) => Client::new().with_timeout(Duration::from_millis(ms)),
        None => Client::new(),
    }
}

fn serve_config_from_args(args: ServeArgs) -> Result<serve::ServeConfig, Error> {
    let value = args.value.as_deref().map(parse_inline_json).transpose()?;
    Ok(serve::ServeConfig {
        bind: args.bind,
        value,
        content_type: args.content_type,
        allow_non_loopback: args.allow_non_loopback,
        max_body_bytes: args.max_body_bytes,
    })
}

fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Stdin for `encode` is always UTF-8 JSON; the charset only applies to the output.
fn parse_input_json(input: &[u8]) -> Result<Value, Error> {
    api::unmarshal(input, "utf-8")
}

fn parse_inline_json(data: &str) -> Result<Value, Error> {
    serde_json::from_str(data).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid json")
            .with_hint("Provide a single JSON value (e.g. '{\"x\":1}').")
            .with_source(err)
    })
}

fn add_charset_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::UnknownCharset => {
            err.with_hint("Use an IANA charset name or alias, e.g. utf-8, iso-8859-1, shift_jis.")
        }
        ErrorKind::UnsupportedCharset => {
            err.with_hint("The charset is registered but has no encoder; pick another charset.")
        }
        ErrorKind::Malformed => {
            err.with_hint("The input bytes are not valid in the given charset; check --charset.")
        }
        _ => err,
    }
}

fn emit_json(value: Value, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let pretty = is_tty || color_mode.use_color(is_tty);
    let json = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(err.to_string()));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(charset) = err.charset() {
        inner.insert("charset".to_string(), json!(charset));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    if let Some(response) = err.response() {
        inner.insert("status".to_string(), json!(response.status));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {err}",
        colorize_label("error:", use_color, AnsiColor::Red)
    )];
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(response) = err.response() {
        lines.push(format!(
            "{} {} {}",
            colorize_label("status:", use_color, AnsiColor::Yellow),
            response.status,
            response.reason
        ));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let command = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .and_then(|usage| {
            let mut tokens = usage.split_whitespace().skip_while(|t| *t != "httpjson");
            tokens.next()?;
            tokens.next().filter(|t| !t.starts_with(['-', '<', '[']))
        });
    match command {
        Some(command) => format!("Try `httpjson {command} --help`."),
        None => "Try `httpjson --help`.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, add_charset_hint, error_json};
    use clap::Parser;
    use httpjson::api::{Error, ErrorKind, ResponseError};

    #[test]
    fn error_json_carries_charset_and_offset() {
        let err = Error::new(ErrorKind::Malformed)
            .with_message("malformed input")
            .with_charset("Shift_JIS")
            .with_offset(2);
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "Malformed");
        assert_eq!(value["error"]["charset"], "Shift_JIS");
        assert_eq!(value["error"]["offset"], 2);
    }

    #[test]
    fn error_json_reports_response_status() {
        let err = Error::from(ResponseError {
            status: 415,
            reason: "Unsupported Media Type".to_string(),
            content_type: Some("text/plain;charset=utf-8".to_string()),
            body: b"invalid encoding name\n".to_vec(),
        });
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "Status");
        assert_eq!(value["error"]["status"], 415);
        assert_eq!(value["error"]["message"], "invalid encoding name");
    }

    #[test]
    fn charset_hints_do_not_replace_existing_ones() {
        let err = add_charset_hint(Error::new(ErrorKind::UnknownCharset));
        assert!(err.hint().is_some_and(|hint| hint.contains("IANA")));

        let err = add_charset_hint(Error::new(ErrorKind::Malformed).with_hint("keep me"));
        assert_eq!(err.hint(), Some("keep me"));
    }

    #[test]
    fn serve_defaults_to_loopback() {
        let cli = Cli::try_parse_from(["httpjson", "serve"]).expect("parse");
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert!(args.bind.ip().is_loopback());
        assert_eq!(args.content_type, "application/json;charset=utf-8");
    }
}
