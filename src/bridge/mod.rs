//! The bridge facade: build → escape → invoke → decode.

pub mod endpoint;

pub use endpoint::Endpoint;

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde_json::Value;

use crate::decode;
use crate::error::{BridgeError, Result};
use crate::escape::{escape_for_shell, quote_word};
use crate::expr::{Arg, Call, Symbol};
use crate::invoke::{InvocationResult, Invoker, ShellInvoker};

/// Immutable settings for one bridge instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// The remote-evaluation binary, normally `emacsclient`.
    pub binary: String,
    pub endpoint: Endpoint,
    /// Shell used to run the command line.
    pub shell: String,
    /// Applied to every call unless overridden per call.
    pub timeout: Duration,
}

/// Evaluates remote procedure calls in a running Emacs.
///
/// Holds no state between calls beyond its configuration; concurrent calls
/// each spawn their own process.
pub struct Bridge {
    config: BridgeConfig,
    invoker: Box<dyn Invoker>,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        let invoker = ShellInvoker::new(config.shell.clone());
        Self::with_invoker(config, invoker)
    }

    pub fn with_invoker(config: BridgeConfig, invoker: impl Invoker + 'static) -> Self {
        info!(
            "bridge ready: binary={} server_file={} (exists: {}) timeout={:?}",
            config.binary,
            config.endpoint.path().display(),
            config.endpoint.exists(),
            config.timeout
        );
        Self {
            config,
            invoker: Box::new(invoker),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The full shell command line for `call`, exactly as it will be run.
    pub fn command_line(&self, call: &Call) -> Result<String> {
        let binary = quote_word(&self.config.binary).map_err(|e| BridgeError::Spawn {
            program: self.config.binary.clone(),
            reason: format!("binary path cannot be quoted: {e}"),
        })?;

        let expression = call.build();
        let mut line = format!("exec {binary}");
        if let Some(flag) = self.config.endpoint.locator_flag()? {
            line.push(' ');
            line.push_str(&flag);
        }
        line.push_str(" -e \"");
        line.push_str(&escape_for_shell(expression.as_str()));
        line.push('"');
        Ok(line)
    }

    /// Run `call` and return its completed result; nonzero exit is `Remote`.
    fn run(&self, call: &Call, timeout: Duration) -> Result<InvocationResult> {
        let line = self.command_line(call)?;
        let started = Instant::now();
        let result = self.invoker.invoke(&line, timeout)?;
        info!(
            "{} exited {} after {:?}",
            call.procedure(),
            result.exit_code,
            started.elapsed()
        );
        debug!("stdout: {}", String::from_utf8_lossy(&result.stdout));
        if !result.stderr.is_empty() {
            debug!("stderr: {}", result.stderr);
        }

        if !result.success() {
            return Err(BridgeError::Remote {
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }
        Ok(result)
    }

    /// Evaluate `call` and decode its reply as structured data.
    pub fn evaluate(&self, call: &Call) -> Result<Value> {
        self.evaluate_with_timeout(call, self.config.timeout)
    }

    /// [`evaluate`](Self::evaluate) with a timeout for this call only.
    pub fn evaluate_with_timeout(&self, call: &Call, timeout: Duration) -> Result<Value> {
        let result = self.run(call, timeout)?;
        decode::decode(decode::utf8(&result.stdout)?)
    }

    /// Evaluate `call` whose reply is a printed string or bare atom.
    pub fn evaluate_text(&self, call: &Call) -> Result<String> {
        self.evaluate_text_with_timeout(call, self.config.timeout)
    }

    pub fn evaluate_text_with_timeout(&self, call: &Call, timeout: Duration) -> Result<String> {
        let result = self.run(call, timeout)?;
        Ok(decode::decode_text(decode::utf8(&result.stdout)?))
    }

    /// Whether Emacs has `feature` loaded (`(featurep 'feature)` prints `t`).
    pub fn feature_loaded(&self, feature: &Symbol) -> Result<bool> {
        let call = Call::new("featurep").arg(Arg::Symbol(feature.clone()));
        Ok(self.evaluate_text(&call)? == crate::expr::T)
    }

    /// The subset of `features` that is not loaded.
    pub fn missing_features(&self, features: &[Symbol]) -> Result<Vec<String>> {
        let mut missing = Vec::new();
        for feature in features {
            if self.feature_loaded(feature)? {
                debug!("feature {feature} is loaded");
            } else {
                warn!("feature {feature} is not loaded");
                missing.push(feature.to_string());
            }
        }
        Ok(missing)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted invoker that records command lines and replays canned results.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[derive(Clone, Default)]
    pub struct Scripted {
        replies: Arc<Mutex<VecDeque<Result<InvocationResult>>>>,
        pub calls: Arc<Mutex<Vec<(String, Duration)>>>,
    }

    impl Scripted {
        pub fn reply(self, stdout: &str) -> Self {
            self.reply_bytes(stdout.as_bytes())
        }

        pub fn reply_bytes(self, stdout: &[u8]) -> Self {
            self.push(Ok(InvocationResult {
                exit_code: 0,
                stdout: stdout.to_vec(),
                stderr: String::new(),
                timed_out: false,
            }))
        }

        pub fn fail(self, exit_code: i32, stderr: &str) -> Self {
            self.push(Ok(InvocationResult {
                exit_code,
                stdout: Vec::new(),
                stderr: stderr.to_string(),
                timed_out: false,
            }))
        }

        pub fn push(self, reply: Result<InvocationResult>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn lines(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(l, _)| l.clone()).collect()
        }

        /// The elisp expression of the `n`th call, recovered by word splitting.
        pub fn expression(&self, n: usize) -> String {
            let line = &self.lines()[n];
            let words = shlex::split(line).unwrap();
            words.last().unwrap().clone()
        }
    }

    impl Invoker for Scripted {
        fn invoke(&self, command_line: &str, timeout: Duration) -> Result<InvocationResult> {
            self.calls
                .lock()
                .unwrap()
                .push((command_line.to_string(), timeout));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted reply for {command_line}"))
        }
    }

    pub fn config() -> BridgeConfig {
        BridgeConfig {
            binary: "emacsclient".into(),
            endpoint: Endpoint::new("/nonexistent/emacs/server"),
            shell: "sh".into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn bridge(script: &Scripted) -> Bridge {
        Bridge::with_invoker(config(), script.clone())
    }
}
