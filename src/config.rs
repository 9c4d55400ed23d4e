use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Daemon-wide settings, loaded from an optional YAML file under a
/// top-level `settings:` key. Missing keys (or a missing file) fall
/// back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,

    #[serde(default = "default_file_quiet_seconds")]
    pub file_quiet_seconds: u64,

    #[serde(default = "default_file_min_interval_seconds")]
    pub file_min_interval_seconds: u64,

    #[serde(default = "default_webhook_host")]
    pub webhook_host: String,

    #[serde(default = "default_webhook_port")]
    pub webhook_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            tick_seconds: default_tick_seconds(),
            file_quiet_seconds: default_file_quiet_seconds(),
            file_min_interval_seconds: default_file_min_interval_seconds(),
            webhook_host: default_webhook_host(),
            webhook_port: default_webhook_port(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("scripter.db")
}
fn default_tick_seconds() -> u64 {
    2
}
fn default_file_quiet_seconds() -> u64 {
    3
}
fn default_file_min_interval_seconds() -> u64 {
    30
}
fn default_webhook_host() -> String {
    "127.0.0.1".into()
}
fn default_webhook_port() -> u16 {
    5055
}

#[derive(Debug, Deserialize, Default)]
struct SettingsDocument {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsSection {
    db_path: Option<PathBuf>,
    tick_seconds: Option<u64>,
    file_quiet_seconds: Option<u64>,
    file_min_interval_seconds: Option<u64>,
    webhook_host: Option<String>,
    webhook_port: Option<u16>,
}

impl Settings {
    /// Load settings from a YAML file. A missing file yields defaults;
    /// a present file that omits a key also falls back to that key's default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let doc: SettingsDocument = serde_yaml::from_str(&raw).unwrap_or_default();
        let s = doc.settings;
        let defaults = Self::default();
        Ok(Self {
            db_path: s.db_path.unwrap_or(defaults.db_path),
            tick_seconds: s.tick_seconds.unwrap_or(defaults.tick_seconds),
            file_quiet_seconds: s.file_quiet_seconds.unwrap_or(defaults.file_quiet_seconds),
            file_min_interval_seconds: s
                .file_min_interval_seconds
                .unwrap_or(defaults.file_min_interval_seconds),
            webhook_host: s.webhook_host.unwrap_or(defaults.webhook_host),
            webhook_port: s.webhook_port.unwrap_or(defaults.webhook_port),
        })
    }

    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
