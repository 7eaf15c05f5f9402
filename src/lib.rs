//! Purpose: Strict, size-bounded JSON request decoding and JSON response writing for HTTP services.
//! Exports: `Codec`, `DecoderConfig`, `Error`/`ErrorKind`, `Envelope`, exchange traits, `StrictJson`.
//! Role: Library only; callers supply the HTTP transport and route handlers.
//! Invariants: Decode failures carry a stable kind and a stable user-facing message.
//! Invariants: Configuration is immutable once a `Codec` is built.

mod codec;
mod config;
mod decode;
mod envelope;
mod error;
mod exchange;
mod extract;
mod json;
mod limit;
mod write;

pub use codec::Codec;
pub use config::{DEFAULT_MAX_BODY_BYTES, DecoderConfig};
pub use envelope::Envelope;
pub use error::{DEFAULT_ERROR_STATUS, Error, ErrorKind, status_for};
pub use exchange::{JsonRequest, ResponseRecorder, ResponseSink};
pub use extract::StrictJson;
pub use limit::LimitedReader;
