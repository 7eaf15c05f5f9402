//! Purpose: Request/response abstractions the codec reads from and writes to.
//! Exports: `JsonRequest`, `ResponseSink`, `ResponseRecorder`.
//! Role: Transport seam; the crate never opens sockets or manages connections.
//! Invariants: Request bodies are consumed by value, so they are read at most once.
//! Invariants: Sinks commit in the order headers, then status, then body.
//! Notes: `ResponseRecorder` doubles as the bridge into axum responses.

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use axum::response::Response;
use std::io::{self, Read};

/// Inbound side of an HTTP exchange.
pub trait JsonRequest {
    type Body: Read;

    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;

    fn into_body(self) -> Self::Body;
}

impl<B: Read> JsonRequest for Request<B> {
    type Body = B;

    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers().get(name)
    }

    fn into_body(self) -> B {
        Request::into_body(self)
    }
}

/// Outbound side of an HTTP exchange.
pub trait ResponseSink {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commits the status line and the current headers.
    fn write_head(&mut self, status: StatusCode);

    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// In-memory sink that records what a handler wrote.
#[derive(Clone, Debug, Default)]
pub struct ResponseRecorder {
    headers: HeaderMap,
    head: Option<(StatusCode, HeaderMap)>,
    body: Vec<u8>,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed status, or 200 when nothing has been written yet.
    pub fn status(&self) -> StatusCode {
        self.head
            .as_ref()
            .map_or(StatusCode::OK, |(status, _)| *status)
    }

    /// Committed headers, or the pending ones before the head is written.
    pub fn headers(&self) -> &HeaderMap {
        self.head
            .as_ref()
            .map_or(&self.headers, |(_, headers)| headers)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_committed(&self) -> bool {
        self.head.is_some()
    }

    pub fn into_response(self) -> Response {
        let (status, headers) = self
            .head
            .unwrap_or((StatusCode::OK, self.headers));
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

impl ResponseSink for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_head(&mut self, status: StatusCode) {
        if let Some((committed, _)) = &self.head {
            tracing::warn!(
                committed = committed.as_u16(),
                ignored = status.as_u16(),
                "response head already written"
            );
            return;
        }
        self.head = Some((status, self.headers.clone()));
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        if self.head.is_none() {
            self.write_head(StatusCode::OK);
        }
        self.body.extend_from_slice(body);
        Ok(())
    }
}
