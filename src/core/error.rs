//! Purpose: Define the single error type shared by the codec, client, and server.
//! Exports: `Error`, `ErrorKind`, `ResponseError`, `to_exit_code`.
//! Role: Carries a stable kind plus optional context; never rewrites the wrapped error.
//! Invariants: `ErrorKind` distinguishes unknown charset names from unsupported ones.
//! Invariants: `source()` always yields the underlying error verbatim when one exists.

use std::error::Error as StdError;
use std::fmt;

use crate::core::charset;
use crate::core::media_type;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    UnknownCharset,
    UnsupportedCharset,
    Malformed,
    Json,
    Io,
    Status,
    ContentType,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    charset: Option<String>,
    offset: Option<u64>,
    response: Option<Box<ResponseError>>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            charset: None,
            offset: None,
            response: None,
            source: None,
        }
    }

    /// Wraps a serializer/deserializer failure, keeping its message as-is.
    pub fn json(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Json)
            .with_message(err.to_string())
            .with_source(err)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn response(&self) -> Option<&ResponseError> {
        self.response.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_response(mut self, response: ResponseError) -> Self {
        self.response = Some(Box::new(response));
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(response) = &self.response {
            return write!(f, "{response}");
        }
        match (&self.message, &self.source) {
            (Some(message), _) => write!(f, "{message}")?,
            (None, Some(source)) => write!(f, "{source}")?,
            (None, None) => write!(f, "{:?}", self.kind)?,
        }
        if let Some(charset) = &self.charset {
            write!(f, " (charset: {charset})")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ResponseError> for Error {
    fn from(response: ResponseError) -> Self {
        Error::new(ErrorKind::Status).with_response(response)
    }
}

/// A non-2xx HTTP response, kept whole so callers can inspect the body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseError {
    pub status: u16,
    pub reason: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ResponseError {
    /// Short text bodies are used as the message; anything else falls back to the status line.
    pub fn message(&self) -> String {
        self.text_body()
            .unwrap_or_else(|| format!("{} {}", self.status, self.reason).trim_end().to_string())
    }

    fn text_body(&self) -> Option<String> {
        let parsed = media_type::parse(self.content_type.as_deref()?).ok()?;
        if !parsed.essence().starts_with("text/") {
            return None;
        }
        let charset = charset::resolve(parsed.param("charset").unwrap_or_default()).ok()?;
        let text = charset.decode(&self.body).ok()?;
        if text.is_empty() || text.len() >= 256 {
            return None;
        }
        Some(text.trim().to_string())
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl StdError for ResponseError {}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::UnknownCharset => 3,
        ErrorKind::UnsupportedCharset => 4,
        ErrorKind::Malformed => 5,
        ErrorKind::Json => 6,
        ErrorKind::Io => 7,
        ErrorKind::Status => 8,
        ErrorKind::ContentType => 9,
    }
}
