//! Purpose: Decoder configuration shared by every decode call of a codec.
//! Exports: `DecoderConfig`, `DEFAULT_MAX_BODY_BYTES`.
//! Role: Immutable settings value; hosts may embed it in their own config files.
//! Invariants: A zero body limit always resolves to the default before use.
//! Invariants: Decoding never mutates the configuration.

use serde::Deserialize;

/// Body limit used when none is configured (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: u64 = 1024 * 1024;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Upper bound on request body bytes; `0` means `DEFAULT_MAX_BODY_BYTES`.
    pub max_body_bytes: u64,
    /// When false, object keys without a matching destination field are rejected.
    pub allow_unknown_fields: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allow_unknown_fields: false,
        }
    }
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    pub fn resolved_max_body_bytes(&self) -> u64 {
        if self.max_body_bytes == 0 {
            DEFAULT_MAX_BODY_BYTES
        } else {
            self.max_body_bytes
        }
    }
}
