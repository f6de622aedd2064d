use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeConfig, Endpoint};
use crate::expr::{InvalidSymbol, Symbol};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable naming the server file; beats the config files.
pub const SERVER_FILE_ENV: &str = "EMACS_SERVER_FILE";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct EndpointConfig {
    #[serde(default)]
    pub binary: String,
    /// Unexpanded; see [`Config::server_file_path`].
    #[serde(default)]
    pub server_file: String,
    #[serde(default)]
    pub shell: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub timeout_secs: u64,
    /// Features `--check` expects to find loaded.
    #[serde(default)]
    pub required_features: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    endpoint: EndpointOverlay,
    #[serde(default)]
    settings: SettingsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct EndpointOverlay {
    binary: Option<String>,
    server_file: Option<String>,
    shell: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    #[serde(default)]
    replace: bool,
    timeout_secs: Option<u64>,
    #[serde(default)]
    required_features: Vec<String>,
    #[serde(default)]
    remove_required_features: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/roam-bridge/config.toml (if exists)
    /// 3. Take the server file from `EMACS_SERVER_FILE` when set
    ///
    /// Command-line flags are applied afterwards by the caller with
    /// [`apply_flags`](Self::apply_flags).
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config.apply_env(std::env::var(SERVER_FILE_ENV).ok());
        config
    }

    /// Try to load user overlay from ~/.config/roam-bridge/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/roam-bridge/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("roam-bridge: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Endpoint: scalar overrides
        let e = overlay.endpoint;
        if let Some(v) = e.binary {
            self.endpoint.binary = v;
        }
        if let Some(v) = e.server_file {
            self.endpoint.server_file = v;
        }
        if let Some(v) = e.shell {
            self.endpoint.shell = v;
        }

        // Settings
        let s = overlay.settings;
        if let Some(v) = s.timeout_secs {
            self.settings.timeout_secs = v;
        }
        merge_list(
            &mut self.settings.required_features,
            s.required_features,
            &s.remove_required_features,
            s.replace,
        );
    }

    /// Server file from the environment; empty values are ignored.
    pub fn apply_env(&mut self, server_file: Option<String>) {
        if let Some(v) = server_file.filter(|v| !v.is_empty()) {
            self.endpoint.server_file = v;
        }
    }

    /// Command-line overrides, the last layer.
    pub fn apply_flags(&mut self, server_file: Option<String>, timeout_secs: Option<u64>) {
        if let Some(v) = server_file {
            self.endpoint.server_file = v;
        }
        if let Some(v) = timeout_secs {
            self.settings.timeout_secs = v;
        }
    }

    /// `server_file` with `~` and `$VAR` expanded. An unset variable leaves
    /// the rest of the path as written.
    pub fn server_file_path(&self) -> String {
        let raw = &self.endpoint.server_file;
        match shellexpand::full(raw) {
            Ok(expanded) => expanded.into_owned(),
            Err(e) => {
                warn!("cannot expand server file {raw}: {e}");
                shellexpand::tilde(raw).into_owned()
            }
        }
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            binary: self.endpoint.binary.clone(),
            endpoint: Endpoint::new(self.server_file_path()),
            shell: self.endpoint.shell.clone(),
            timeout: Duration::from_secs(self.settings.timeout_secs),
        }
    }

    /// `required_features` checked as elisp symbols; the first bad name is refused.
    pub fn required_symbols(&self) -> Result<Vec<Symbol>, InvalidSymbol> {
        self.settings
            .required_features
            .iter()
            .map(|name| Symbol::new(name))
            .collect()
    }

    /// The merged configuration as TOML, for `--dump-config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
