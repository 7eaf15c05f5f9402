//! Purpose: Strict single-value JSON decode over a bounded body buffer.
//! Exports: `decode_slice`, `byte_offset`.
//! Role: Maps serde_json failures onto the stable classified error messages.
//! Invariants: Whitespace-only input is an empty body, never a syntax error.
//! Invariants: Whitespace after the first value is accepted; any other trailing byte is not.
//! Invariants: Unknown keys are detected while decoding, not by a second pass.
//! Invariants: Unknown-key and type-mismatch paths render alike (`items[0].count`).
//! Notes: serde_json reports line/column; offsets are recomputed as byte offsets.
//! Notes: Nesting deeper than serde_json's recursion limit (128) is a syntax error.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{Error, ErrorKind};

pub(crate) fn decode_slice<T: DeserializeOwned>(
    input: &[u8],
    allow_unknown_fields: bool,
) -> Result<T, Error> {
    if is_blank(input) {
        return Err(Error::empty_body());
    }

    let mut de = serde_json::Deserializer::from_slice(input);
    let mut first_unknown: Option<String> = None;
    let mut on_ignored = |path: serde_ignored::Path<'_>| {
        if first_unknown.is_none() {
            first_unknown = Some(ignored_key_path(&path));
        }
    };
    let decoded = serde_path_to_error::deserialize::<_, T>(serde_ignored::Deserializer::new(
        &mut de,
        &mut on_ignored,
    ));
    let unknown = if allow_unknown_fields {
        None
    } else {
        first_unknown
    };

    let value = match decoded {
        Ok(value) => value,
        Err(err) => {
            let field = field_path(err.path());
            return Err(classify(input, err.into_inner(), &field, unknown));
        }
    };
    if let Some(key) = unknown {
        return Err(unknown_key(&key));
    }
    de.end()
        .map_err(|err| Error::multiple_values().with_source(err))?;
    Ok(value)
}

fn classify(input: &[u8], err: serde_json::Error, field: &str, unknown: Option<String>) -> Error {
    let offset = byte_offset(input, err.line(), err.column());
    match err.classify() {
        Category::Syntax => {
            let at = offset.unwrap_or_default();
            Error::new(ErrorKind::SyntaxError)
                .with_message(format!("body contains badly-formed JSON (at character {at})"))
                .with_offset(at)
                .with_source(err)
        }
        Category::Eof => Error::new(ErrorKind::UnexpectedEof)
            .with_message("body contains badly-formed JSON")
            .with_source(err),
        Category::Data => match unknown {
            Some(key) => unknown_key(&key),
            None => classify_data(err, field, offset),
        },
        Category::Io => Error::new(ErrorKind::Unknown)
            .with_message(err.to_string())
            .with_source(err),
    }
}

fn classify_data(err: serde_json::Error, field: &str, offset: Option<u64>) -> Error {
    let message = err.to_string();
    if is_type_mismatch(&message) {
        let at = offset.unwrap_or_default();
        return Error::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "body contains incorrect JSON type for field {field:?} at offset {at}"
            ))
            .with_field(field)
            .with_offset(at)
            .with_source(err);
    }
    if let Some(key) = denied_field(&message) {
        return unknown_key(key);
    }
    let mut out = Error::new(ErrorKind::InvalidTarget)
        .with_message(format!("error unmarshalling json: {message}"));
    if !field.is_empty() {
        out = out.with_field(field);
    }
    if let Some(at) = offset {
        out = out.with_offset(at);
    }
    out.with_source(err)
}

fn unknown_key(key: &str) -> Error {
    Error::new(ErrorKind::UnknownField)
        .with_message(format!("body contains unknown key {key:?}"))
        .with_field(key)
}

fn is_type_mismatch(message: &str) -> bool {
    ["invalid type:", "invalid value:", "invalid length"]
        .iter()
        .any(|prefix| message.starts_with(prefix))
}

/// Key named by a destination that itself denies unknown fields.
fn denied_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("unknown field `")
        .and_then(|rest| rest.split('`').next())
}

/// Renders the path to an ignored key in the same shape as `field_path`.
fn ignored_key_path(path: &serde_ignored::Path<'_>) -> String {
    enum Segment {
        Key(String),
        Index(usize),
    }

    let mut segments = Vec::new();
    let mut cursor = path;
    loop {
        match cursor {
            serde_ignored::Path::Root => break,
            serde_ignored::Path::Seq { parent, index } => {
                segments.push(Segment::Index(*index));
                cursor = *parent;
            }
            serde_ignored::Path::Map { parent, key } => {
                segments.push(Segment::Key(key.to_string()));
                cursor = *parent;
            }
            serde_ignored::Path::Some { parent }
            | serde_ignored::Path::NewtypeStruct { parent }
            | serde_ignored::Path::NewtypeVariant { parent } => cursor = *parent,
        }
    }

    let mut out = String::new();
    for segment in segments.into_iter().rev() {
        match segment {
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(&key);
            }
            Segment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

fn field_path(path: &serde_path_to_error::Path) -> String {
    if path.iter().next().is_none() {
        String::new()
    } else {
        path.to_string()
    }
}

fn is_blank(input: &[u8]) -> bool {
    input
        .iter()
        .all(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Converts a 1-based line and a byte column into an offset from the start of `input`.
pub(crate) fn byte_offset(input: &[u8], line: usize, column: usize) -> Option<u64> {
    if line == 0 {
        return None;
    }
    let start_of_line = if line == 1 {
        0
    } else {
        input
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == b'\n')
            .nth(line - 2)
            .map(|(idx, _)| idx + 1)?
    };
    Some((start_of_line + column) as u64)
}
