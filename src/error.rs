//! Error taxonomy shared by every stage of a bridge call.

use std::time::Duration;

use thiserror::Error;

/// Raw stdout is never carried in full; only this many characters survive.
pub const SNIPPET_LIMIT: usize = 1000;

/// The token Emacs prints for a call that succeeded without a value.
pub const NO_VALUE_TOKEN: &str = "nil";

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The external binary could not be launched.
    #[error("[spawn] failed to launch `{program}`: {reason}")]
    Spawn { program: String, reason: String },

    /// The invocation ran past the configured duration and was killed.
    #[error("[timeout] remote evaluation timed out after {} seconds", .timeout.as_secs_f64())]
    Timeout { timeout: Duration },

    /// The binary exited nonzero; `stderr` is kept verbatim.
    #[error("[remote] remote evaluation failed with exit code {exit_code}: {stderr}")]
    Remote { exit_code: i32, stderr: String },

    /// Stdout could not be coerced to structured data.
    #[error(
        "[decode] failed to decode response at line {line} column {column}: {message}. \
         Raw response (first 1000 chars): {snippet}"
    )]
    Decode {
        message: String,
        line: usize,
        column: usize,
        snippet: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Spawn,
    Timeout,
    Remote,
    Decode,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Spawn => "spawn",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Remote => "remote",
            ErrorKind::Decode => "decode",
        }
    }
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Spawn { .. } => ErrorKind::Spawn,
            BridgeError::Timeout { .. } => ErrorKind::Timeout,
            BridgeError::Remote { .. } => ErrorKind::Remote,
            BridgeError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Build a decode error from a serde_json failure against `raw`.
    pub fn decode(err: &serde_json::Error, raw: &str) -> Self {
        BridgeError::Decode {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
            snippet: snippet(raw),
        }
    }

    /// Build a decode error for stdout that is not UTF-8. The position is
    /// that of the first bad byte; the snippet is lossy.
    pub fn invalid_utf8(err: &std::str::Utf8Error, raw: &[u8]) -> Self {
        let valid = &raw[..err.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = valid
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        BridgeError::Decode {
            message: format!("reply is not valid UTF-8 at byte {}", err.valid_up_to()),
            line,
            column: valid.len() - line_start + 1,
            snippet: snippet(&String::from_utf8_lossy(raw)),
        }
    }

    /// Whether the surfaced text is exactly the no-value token.
    ///
    /// Only procedures whose contract is "success returns nil" may act on
    /// this; everything else must propagate the error.
    pub fn is_no_value(&self) -> bool {
        match self {
            BridgeError::Remote { stderr, .. } => stderr.trim() == NO_VALUE_TOKEN,
            BridgeError::Decode { snippet, .. } => snippet.trim() == NO_VALUE_TOKEN,
            _ => false,
        }
    }
}

/// First [`SNIPPET_LIMIT`] characters of `raw`.
pub fn snippet(raw: &str) -> String {
    raw.chars().take(SNIPPET_LIMIT).collect()
}
