//! Purpose: axum integration for strict JSON request bodies and error replies.
//! Exports: `StrictJson`.
//! Role: Async front door that collects a bounded body and reuses the sync decode pipeline.
//! Invariants: A declared Content-Length above the limit is rejected before reading.
//! Invariants: At most `limit + 1` body bytes are buffered.
//! Notes: Rejections render as error envelopes with the kind's suggested status.

use axum::async_trait;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::HeaderValue;
use axum::http::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use std::io::Cursor;
use tokio_stream::StreamExt;

use crate::codec::Codec;
use crate::decode::check_content_type;
use crate::envelope::Envelope;
use crate::error::{Error, ErrorKind};

/// Extractor that decodes the body with the state's `Codec`.
#[derive(Clone, Debug)]
pub struct StrictJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Codec: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let codec = Codec::from_ref(state);
        let limit = codec.config().resolved_max_body_bytes();
        let (parts, body) = req.into_parts();

        check_content_type(parts.headers.get(CONTENT_TYPE))?;
        if let Some(declared) = declared_length(parts.headers.get(CONTENT_LENGTH)) {
            if declared > limit {
                tracing::debug!(declared, limit, "rejected request body by content-length");
                return Err(Error::too_large(limit));
            }
        }

        let mut stream = body.into_data_stream();
        let mut buf = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| {
                Error::new(ErrorKind::Unknown)
                    .with_message(err.to_string())
                    .with_source(err)
            })?;
            if append_bounded(&mut buf, &chunk, limit) {
                break;
            }
        }

        let request = axum::http::Request::from_parts(parts, Cursor::new(buf));
        codec.decode(request).map(StrictJson)
    }
}

/// Appends at most `limit + 1` bytes in total; true once the limit is exceeded.
fn append_bounded(buf: &mut Vec<u8>, chunk: &[u8], limit: u64) -> bool {
    let room = limit.saturating_add(1).saturating_sub(buf.len() as u64);
    let take = usize::try_from(room).map_or(chunk.len(), |room| chunk.len().min(room));
    buf.extend_from_slice(&chunk[..take]);
    buf.len() as u64 > limit
}

fn declared_length(value: Option<&HeaderValue>) -> Option<u64> {
    value?.to_str().ok()?.trim().parse().ok()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: Envelope = Envelope::failure(self.message());
        let mut response = (status, axum::Json(body)).into_response();
        if self.kind() == ErrorKind::BodyTooLarge {
            response
                .headers_mut()
                .insert(CONNECTION, HeaderValue::from_static("close"));
        }
        response
    }
}
