//! Purpose: Serialize values and emit them as JSON responses.
//! Exports: `write_json`, `write_error`.
//! Role: Outbound half of the codec; thin serialize-then-emit over a `ResponseSink`.
//! Invariants: Nothing reaches the sink when serialization fails.
//! Invariants: Content-Type ends up `application/json` whatever headers the caller passes.
//! Invariants: Body write failures are returned, never wrapped into a second response.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde::Serialize;
use std::fmt::Display;

use crate::decode::JSON_MEDIA_TYPE;
use crate::envelope::Envelope;
use crate::error::{DEFAULT_ERROR_STATUS, Error, ErrorKind};
use crate::exchange::ResponseSink;

pub(crate) fn write_json<S, T>(
    sink: &mut S,
    status: StatusCode,
    payload: &T,
    headers: Option<&HeaderMap>,
) -> Result<(), Error>
where
    S: ResponseSink + ?Sized,
    T: Serialize + ?Sized,
{
    let out = serde_json::to_vec(payload).map_err(|err| {
        Error::new(ErrorKind::Encode)
            .with_message(err.to_string())
            .with_source(err)
    })?;

    if let Some(headers) = headers {
        apply_headers(sink.headers_mut(), headers);
    }
    sink.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
    sink.write_head(status);
    sink.write_body(&out).map_err(|err| {
        tracing::warn!(status = status.as_u16(), error = %err, "failed to write response body");
        Error::new(ErrorKind::Io)
            .with_message(err.to_string())
            .with_source(err)
    })
}

pub(crate) fn write_error<S, E>(
    sink: &mut S,
    err: &E,
    status: Option<StatusCode>,
) -> Result<(), Error>
where
    S: ResponseSink + ?Sized,
    E: Display + ?Sized,
{
    let payload: Envelope = Envelope::failure(err.to_string());
    write_json(sink, status.unwrap_or(DEFAULT_ERROR_STATUS), &payload, None)
}

/// Replaces every value of each named header with the caller's values.
fn apply_headers(target: &mut HeaderMap, headers: &HeaderMap) {
    for name in headers.keys() {
        target.remove(name);
        for value in headers.get_all(name) {
            target.append(name.clone(), value.clone());
        }
    }
}
