use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{BridgeError, Result};
use crate::escape::quote_word;

/// Location of a running Emacs server's socket or server file.
///
/// Existence is re-checked on every call and is advisory only: when the
/// file is missing the binary runs without a locator and falls back to its
/// default connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: PathBuf,
}

impl Endpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `--server-file=<quoted path>` when the endpoint is present.
    pub fn locator_flag(&self) -> Result<Option<String>> {
        if !self.exists() {
            warn!(
                "server file {} does not exist, using the default connection",
                self.path.display()
            );
            return Ok(None);
        }
        let text = self.path.to_string_lossy();
        let quoted = quote_word(&text).map_err(|e| BridgeError::Spawn {
            program: text.to_string(),
            reason: format!("server file path cannot be quoted: {e}"),
        })?;
        Ok(Some(format!("--server-file={quoted}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoint_has_no_flag() {
        let ep = Endpoint::new("/nonexistent/emacs/server");
        assert!(!ep.exists());
        assert_eq!(ep.locator_flag().unwrap(), None);
    }

    #[test]
    fn present_endpoint_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my server");
        std::fs::write(&path, "").unwrap();

        let flag = Endpoint::new(&path).locator_flag().unwrap().unwrap();
        let words = shlex::split(&flag).unwrap();
        assert_eq!(words, vec![format!("--server-file={}", path.display())]);
    }
}
