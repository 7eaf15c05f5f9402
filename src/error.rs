//! Purpose: Classified error model shared by the decode and write paths.
//! Exports: `Error`, `ErrorKind`, `status_for`, `DEFAULT_ERROR_STATUS`.
//! Role: Single error type returned by every public operation of the crate.
//! Invariants: `Display` renders exactly the user-facing message (no kind prefix).
//! Invariants: Kind-to-status mapping is stable; callers may key HTTP responses on it.
//! Notes: Offsets and field paths are diagnostics only; the message is the contract.

use axum::http::StatusCode;
use std::error::Error as StdError;
use std::fmt;

/// Status used by `write_error` when the caller does not pick one.
pub const DEFAULT_ERROR_STATUS: StatusCode = StatusCode::BAD_REQUEST;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidContentType,
    BodyTooLarge,
    EmptyBody,
    SyntaxError,
    UnexpectedEof,
    TypeMismatch,
    UnknownField,
    InvalidTarget,
    MultipleValues,
    Unknown,
    /// Response payload has no JSON representation.
    Encode,
    /// Response body could not be written to the transport.
    Io,
}

impl ErrorKind {
    /// True for kinds produced while reading a request body.
    pub fn is_decode(self) -> bool {
        !matches!(self, ErrorKind::Encode | ErrorKind::Io)
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    field: Option<String>,
    offset: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            field: None,
            offset: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable text placed in error envelopes.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| default_message(self.kind))
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub(crate) fn content_type() -> Self {
        Self::new(ErrorKind::InvalidContentType)
            .with_message("the Content-Type header is not application/json")
    }

    pub(crate) fn too_large(limit: u64) -> Self {
        Self::new(ErrorKind::BodyTooLarge)
            .with_message(format!("body must not be larger than {limit} bytes"))
    }

    pub(crate) fn empty_body() -> Self {
        Self::new(ErrorKind::EmptyBody).with_message("body must not be empty")
    }

    pub(crate) fn multiple_values() -> Self {
        Self::new(ErrorKind::MultipleValues)
            .with_message("body must only contain a single JSON value")
    }

    /// Suggested HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

fn default_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidContentType => "the Content-Type header is not application/json",
        ErrorKind::BodyTooLarge => "body is too large",
        ErrorKind::EmptyBody => "body must not be empty",
        ErrorKind::SyntaxError | ErrorKind::UnexpectedEof => "body contains badly-formed JSON",
        ErrorKind::TypeMismatch => "body contains incorrect JSON type",
        ErrorKind::UnknownField => "body contains unknown key",
        ErrorKind::InvalidTarget => "error unmarshalling json",
        ErrorKind::MultipleValues => "body must only contain a single JSON value",
        ErrorKind::Unknown => "error",
        ErrorKind::Encode => "failed to encode response",
        ErrorKind::Io => "failed to write response",
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::InvalidContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorKind::EmptyBody
        | ErrorKind::SyntaxError
        | ErrorKind::UnexpectedEof
        | ErrorKind::TypeMismatch
        | ErrorKind::UnknownField
        | ErrorKind::InvalidTarget
        | ErrorKind::MultipleValues
        | ErrorKind::Unknown => StatusCode::BAD_REQUEST,
        ErrorKind::Encode | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
