//! Purpose: JSON envelope used for success and error replies.
//! Exports: `Envelope`.
//! Role: Wire shape `{error, message, data?}` shared by servers and clients.
//! Invariants: Error envelopes never carry `data`; absent data is omitted, not null.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}
