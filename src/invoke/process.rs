use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

use super::{InvocationResult, Invoker};
use crate::error::{BridgeError, Result};

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Shell exit status for "command not found".
const EXIT_NOT_FOUND: i32 = 127;
/// Shell exit status for "found but not executable".
const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Runs command lines through `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellInvoker {
    shell: String,
}

impl ShellInvoker {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    fn spawn(&self, command_line: &str) -> Result<Child> {
        Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BridgeError::Spawn {
                program: self.shell.clone(),
                reason: e.to_string(),
            })
    }
}

impl Default for ShellInvoker {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl Invoker for ShellInvoker {
    fn invoke(&self, command_line: &str, timeout: Duration) -> Result<InvocationResult> {
        debug!("spawning via {}: {}", self.shell, command_line);
        let mut child = self.spawn(command_line)?;
        let pid = child.id();

        // Drain both pipes concurrently so a chatty child never blocks on a full pipe.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        warn!("pid={pid} exceeded {timeout:?}, killing");
                        let _ = child.kill();
                        let _ = child.wait();
                        // Reader threads are detached: a grandchild may still
                        // hold the pipes, and partial output is discarded anyway.
                        return Err(BridgeError::Timeout { timeout });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(BridgeError::Spawn {
                        program: self.shell.clone(),
                        reason: format!("wait failed: {e}"),
                    });
                }
            }
        };

        let result = InvocationResult {
            exit_code: status.code().unwrap_or(-1),
            stdout: collect(stdout),
            stderr: String::from_utf8_lossy(&collect(stderr)).into_owned(),
            timed_out: false,
        };
        debug!("pid={pid} exited with {}", result.exit_code);

        classify(command_line, result)
    }
}

/// Treat the shell's own "could not run it" statuses as spawn failures.
fn classify(command_line: &str, result: InvocationResult) -> Result<InvocationResult> {
    match result.exit_code {
        EXIT_NOT_FOUND | EXIT_NOT_EXECUTABLE => {
            let program = command_line
                .split_whitespace()
                .find(|w| *w != "exec")
                .unwrap_or_default()
                .to_string();
            let reason = match result.stderr.trim() {
                "" if result.exit_code == EXIT_NOT_FOUND => "command not found".to_string(),
                "" => "permission denied".to_string(),
                msg => msg.to_string(),
            };
            Err(BridgeError::Spawn { program, reason })
        }
        _ => Ok(result),
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
