//! Ordered key-value text form (KV form).
//!
//! KV form is the line-oriented encoding used for persisting and
//! transmitting associations and for producing the canonical bytes handed
//! to the signing primitive. Each pair is rendered as `key:value\n`, pairs
//! concatenated in input order. The encoding is deterministic, lossless,
//! and order-preserving, which is what makes it usable as a signing base.
//!
//! There is no escaping mechanism. Callers guarantee that keys and values
//! never contain a newline and that keys never contain a colon; every field
//! of an association satisfies this by construction (secrets and timestamps
//! are base64/decimal text before they reach a pair). Values MAY contain
//! colons: decoding splits each line on the first colon only, so such
//! values round-trip.

use thiserror::Error;

/// Decode mode for KV form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Reject any line without a colon separator.
    Strict,
    /// Skip lines without a colon separator, logging a warning.
    ///
    /// This exists to tolerate slightly malformed legacy input. The
    /// association format itself always decodes in [`ParseMode::Strict`].
    Tolerant,
}

/// Errors produced by KV form encoding and decoding.
#[derive(Debug, Error)]
pub enum KvError {
    /// Pair whose key or value cannot be carried by the format.
    #[error("cannot encode pair {key:?}: {reason}")]
    InvalidCharacter { key: String, reason: &'static str },

    /// Line without a colon separator, rejected in strict mode.
    #[error("malformed line {line_no}: {line:?} has no colon separator")]
    MalformedLine { line_no: usize, line: String },
}

/// Encode an ordered sequence of `(key, value)` pairs to KV form.
///
/// Fails with [`KvError::InvalidCharacter`] if any key contains a newline
/// or colon, or any value contains a newline. Duplicate keys are allowed;
/// order is preserved verbatim.
pub fn to_kv<K, V>(pairs: &[(K, V)]) -> Result<String, KvError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        let key = key.as_ref();
        let value = value.as_ref();

        if key.contains('\n') {
            return Err(KvError::InvalidCharacter {
                key: key.to_string(),
                reason: "key contains a newline",
            });
        }
        if key.contains(':') {
            return Err(KvError::InvalidCharacter {
                key: key.to_string(),
                reason: "key contains a colon",
            });
        }
        if value.contains('\n') {
            return Err(KvError::InvalidCharacter {
                key: key.to_string(),
                reason: "value contains a newline",
            });
        }

        out.push_str(key);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }
    Ok(out)
}

/// Decode KV form text into the ordered sequence of `(key, value)` pairs.
///
/// Lines are split on newline; empty lines (including the one produced by a
/// final terminator) are ignored. Each remaining line is split on its first
/// colon, so values containing colons are preserved. A line with no colon
/// fails with [`KvError::MalformedLine`] under [`ParseMode::Strict`] and is
/// skipped with a warning under [`ParseMode::Tolerant`].
///
/// Inverse of [`to_kv`]: `from_kv(&to_kv(p)?, ParseMode::Strict)? == p` for
/// any pairs meeting the character constraints.
pub fn from_kv(input: &str, mode: ParseMode) -> Result<Vec<(String, String)>, KvError> {
    let mut pairs = Vec::new();
    for (idx, line) in input.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        match line.split_once(':') {
            Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
            None => match mode {
                ParseMode::Strict => {
                    return Err(KvError::MalformedLine {
                        line_no: idx + 1,
                        line: line.to_string(),
                    });
                }
                ParseMode::Tolerant => {
                    tracing::warn!(line_no = idx + 1, "skipping KV line with no colon separator");
                }
            },
        }
    }
    Ok(pairs)
}
