//! Response decoding: captured stdout → structured value.
//!
//! `emacsclient -e` prints the elisp result, so a procedure that returns a
//! JSON string arrives wrapped in one more layer of quoting, and Emacs'
//! encoder sometimes leaves control characters raw. The pipeline runs from
//! the cheapest fix to the rarest one, each stage only when the previous
//! one has not produced structured data:
//!
//! 1. pre-clean raw control characters inside strings ([`preclean`])
//! 2. strict parse (falling back to a full control-character sweep)
//! 3. unwrap a double-encoded string payload
//! 4. rebuild a string serialized as an index-keyed object ([`chararray`])
//!
//! When every stage fails the error carries the parse position and a
//! bounded snippet of the raw text, never the whole payload.

pub mod chararray;
pub mod preclean;
pub mod text;

pub use preclean::{preclean, sweep_control_chars};
pub use text::decode_text;

use log::{debug, error, warn};
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// Captured stdout as text. Bytes that are not UTF-8 fail here rather than
/// reaching the parser as replacement characters.
pub fn utf8(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw).map_err(|e| {
        let err = BridgeError::invalid_utf8(&e, raw);
        error!("{err}");
        err
    })
}

/// Decode a raw reply into a structured value.
pub fn decode(raw: &str) -> Result<Value> {
    let parsed = parse_outer(raw)?;

    let parsed = match parsed {
        Value::String(inner) => {
            debug!("reply is a string, unwrapping double encoding");
            parse_payload(&inner, raw)?
        }
        other => other,
    };

    match parsed {
        Value::Object(map) => match chararray::reconstruct(&map) {
            Some(rebuilt) => {
                warn!("reply was an index-keyed character array, rebuilding string");
                parse_payload(&rebuilt, raw)
            }
            None => Ok(Value::Object(map)),
        },
        other => Ok(other),
    }
}

/// Stages 1 and 2 on the captured text, minus surrounding whitespace.
fn parse_outer(raw: &str) -> Result<Value> {
    let primary = match serde_json::from_str(&preclean(raw.trim())) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    warn!("initial parse failed: {primary}; retrying with a full control-character sweep");
    sweep_retry(raw).ok_or_else(|| decode_failure(&primary, raw))
}

/// Every control character escaped, including the trailing newline
/// emacsclient prints, unless it is trimmed first.
fn sweep_retry(raw: &str) -> Option<Value> {
    serde_json::from_str(&sweep_control_chars(raw.trim())).ok()
}

/// Parse a payload that was the body of a string, first string-aware, then
/// with every control character escaped.
fn parse_payload(payload: &str, raw: &str) -> Result<Value> {
    let first = match serde_json::from_str(&preclean(payload)) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    debug!("payload parse failed: {first}; sweeping control characters");
    serde_json::from_str(&sweep_control_chars(payload)).map_err(|_| decode_failure(&first, raw))
}

fn decode_failure(err: &serde_json::Error, raw: &str) -> BridgeError {
    let err = BridgeError::decode(err, raw);
    error!("{err}");
    err
}
