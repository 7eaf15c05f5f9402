//! Purpose: Byte-budget guard for request body streams.
//! Exports: `LimitedReader`.
//! Role: Wraps the inbound body so over-sized payloads abort the read.
//! Invariants: Exactly `limit` bytes are accepted; byte `limit + 1` trips the guard.
//! Invariants: Once tripped, every further read fails.

use std::io::{self, Read};

#[derive(Debug)]
pub struct LimitedReader<R> {
    inner: R,
    limit: u64,
    remaining: u64,
    tripped: bool,
}

impl<R: Read> LimitedReader<R> {
    pub fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            limit,
            remaining: limit,
            tripped: false,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn tripped(&self) -> bool {
        self.tripped
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for LimitedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.tripped {
            return Err(too_large());
        }
        if buf.is_empty() {
            return Ok(0);
        }
        // One byte past the budget is enough to detect overflow.
        let window = self.remaining.saturating_add(1);
        let len = usize::try_from(window).map_or(buf.len(), |window| buf.len().min(window));
        let read = self.inner.read(&mut buf[..len])?;
        if read as u64 > self.remaining {
            self.remaining = 0;
            self.tripped = true;
            return Err(too_large());
        }
        self.remaining -= read as u64;
        Ok(read)
    }
}

fn too_large() -> io::Error {
    io::Error::other("request body too large")
}
