//! Process invocation: one external command per call, bounded by a timeout.

pub mod process;

pub use process::ShellInvoker;

use std::time::Duration;

use crate::error::Result;

/// Outcome of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Exit status, or -1 when the process was ended by a signal.
    pub exit_code: i32,
    /// Raw bytes; the decoder insists on UTF-8.
    pub stdout: Vec<u8>,
    /// Lossily decoded. Only ever shown in error messages, never parsed.
    pub stderr: String,
    /// Always false on a returned result; a timeout surfaces as an error.
    pub timed_out: bool,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs one command line to completion or until `timeout` expires.
///
/// A nonzero exit is not an error at this layer; the caller decides.
pub trait Invoker: Send + Sync {
    fn invoke(&self, command_line: &str, timeout: Duration) -> Result<InvocationResult>;
}
