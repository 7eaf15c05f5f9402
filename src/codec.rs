//! Purpose: Public entry point tying configuration to the decode and write paths.
//! Exports: `Codec`.
//! Role: One instance per configuration, shared read-only across requests and threads.
//! Invariants: Decode failures are returned classified; the codec never writes them itself.
//! Invariants: A tripped size guard only marks the sink `Connection: close`.

use axum::http::header::CONNECTION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;

use crate::config::DecoderConfig;
use crate::decode;
use crate::error::{Error, ErrorKind};
use crate::exchange::{JsonRequest, ResponseRecorder, ResponseSink};
use crate::write;

#[derive(Clone, Debug, Default)]
pub struct Codec {
    config: DecoderConfig,
}

impl Codec {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes exactly one JSON value from the request body.
    ///
    /// Steps run in order and stop at the first failure: Content-Type check,
    /// bounded body read, strict decode, trailing-content check.
    pub fn read_json<T, S, R>(&self, sink: &mut S, request: R) -> Result<T, Error>
    where
        T: DeserializeOwned,
        S: ResponseSink + ?Sized,
        R: JsonRequest,
    {
        self.decode(request).inspect_err(|err| {
            if err.kind() == ErrorKind::BodyTooLarge {
                sink.headers_mut()
                    .insert(CONNECTION, HeaderValue::from_static("close"));
            }
        })
    }

    /// Like `read_json`, but stores into `dest`. `dest` is untouched on failure.
    pub fn read_json_into<T, S, R>(&self, sink: &mut S, request: R, dest: &mut T) -> Result<(), Error>
    where
        T: DeserializeOwned,
        S: ResponseSink + ?Sized,
        R: JsonRequest,
    {
        *dest = self.read_json(sink, request)?;
        Ok(())
    }

    pub fn write_json<S, T>(
        &self,
        sink: &mut S,
        status: StatusCode,
        payload: &T,
        headers: Option<&HeaderMap>,
    ) -> Result<(), Error>
    where
        S: ResponseSink + ?Sized,
        T: Serialize + ?Sized,
    {
        write::write_json(sink, status, payload, headers)
    }

    /// Writes `{"error": true, "message": ...}`; status defaults to 400.
    pub fn write_error<S, E>(
        &self,
        sink: &mut S,
        err: &E,
        status: Option<StatusCode>,
    ) -> Result<(), Error>
    where
        S: ResponseSink + ?Sized,
        E: Display + ?Sized,
    {
        write::write_error(sink, err, status)
    }

    /// Builds an axum response through `write_json`.
    pub fn respond<T>(
        &self,
        status: StatusCode,
        payload: &T,
        headers: Option<&HeaderMap>,
    ) -> Result<Response, Error>
    where
        T: Serialize + ?Sized,
    {
        let mut recorder = ResponseRecorder::new();
        self.write_json(&mut recorder, status, payload, headers)?;
        Ok(recorder.into_response())
    }

    pub(crate) fn decode<T, R>(&self, request: R) -> Result<T, Error>
    where
        T: DeserializeOwned,
        R: JsonRequest,
    {
        decode::decode_request(&self.config, request).inspect_err(|err| {
            tracing::debug!(kind = ?err.kind(), offset = ?err.offset(), "rejected request body");
        })
    }
}
