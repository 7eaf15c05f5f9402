//! Purpose: Request-level decode pipeline (content type, size guard, strict decode).
//! Exports: `decode_request`, `check_content_type`.
//! Role: Ordered validation steps shared by the sync API and the axum extractor.
//! Invariants: Each step short-circuits the remaining ones on failure.
//! Invariants: The body stream is consumed exactly once, through the size guard.
//! Notes: A missing or empty Content-Type is accepted; a present mismatching one is not.

use axum::http::HeaderValue;
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use std::io::Read;

use crate::config::DecoderConfig;
use crate::error::{Error, ErrorKind};
use crate::exchange::JsonRequest;
use crate::json::parse;
use crate::limit::LimitedReader;

pub(crate) const JSON_MEDIA_TYPE: &str = "application/json";

pub(crate) fn decode_request<T, R>(config: &DecoderConfig, request: R) -> Result<T, Error>
where
    T: DeserializeOwned,
    R: JsonRequest,
{
    check_content_type(request.header(&CONTENT_TYPE))?;
    let body = read_limited(request.into_body(), config.resolved_max_body_bytes())?;
    parse::decode_slice(&body, config.allow_unknown_fields)
}

pub(crate) fn check_content_type(value: Option<&HeaderValue>) -> Result<(), Error> {
    match value {
        Some(value) if !value.is_empty() => {
            if value.as_bytes().eq_ignore_ascii_case(JSON_MEDIA_TYPE.as_bytes()) {
                Ok(())
            } else {
                Err(Error::content_type())
            }
        }
        _ => Ok(()),
    }
}

fn read_limited<B: Read>(body: B, limit: u64) -> Result<Vec<u8>, Error> {
    let mut reader = LimitedReader::new(body, limit);
    let mut buf = Vec::new();
    match reader.read_to_end(&mut buf) {
        Ok(_) => Ok(buf),
        Err(_) if reader.tripped() => Err(Error::too_large(limit)),
        Err(err) => Err(Error::new(ErrorKind::Unknown)
            .with_message(err.to_string())
            .with_source(err)),
    }
}
