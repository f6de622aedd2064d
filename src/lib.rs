//! roam-bridge: call org-roam procedures in a running Emacs over `emacsclient`.
//!
//! Each call is rendered as an elisp expression, escaped for a shell, run as
//! a bounded child process, and its printed reply decoded back into JSON.
//! Emacs' replies are not always well-formed, so decoding repairs raw control
//! characters, unwraps double encoding, and rebuilds strings serialized as
//! character arrays before giving up.
//!
//! # Architecture
//!
//! - **[`expr`]**: Expression building: typed arguments, call forms.
//! - **[`escape`]**: Elisp string-literal and shell escaping.
//! - **[`invoke`]**: Process invocation with a timeout; the [`invoke::Invoker`] seam.
//! - **[`decode`]**: Reply decoding and repair.
//! - **[`bridge`]**: The facade tying the pipeline together.
//! - **[`procedures`]**: Typed wrappers for the org-roam API.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Stderr and file logging.

/// Bridge facade and server-file endpoint.
pub mod bridge;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Reply decoding: pre-clean, strict parse, unwrap, character arrays.
pub mod decode;
/// Error type shared by every stage.
pub mod error;
/// Escaping for elisp string literals and the shell.
pub mod escape;
/// Elisp expression building.
pub mod expr;
/// Child process execution.
pub mod invoke;
/// Logger setup and UTC timestamps.
pub mod logging;
/// Typed org-roam procedure calls.
pub mod procedures;
/// CLI request and response JSON.
pub mod request;

pub use bridge::{Bridge, BridgeConfig};
pub use error::{BridgeError, ErrorKind, Result};
pub use expr::{Arg, Call};
