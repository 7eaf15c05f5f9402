//! Purpose: Internal JSON decoding boundary for request bodies.
//! Exports: `parse` module with the strict single-value decode and error mapping.
//! Role: Single seam for parser details so callers only see classified errors.
//! Invariants: All body decoding goes through `parse::decode_slice`.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
