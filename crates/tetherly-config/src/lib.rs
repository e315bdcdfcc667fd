//! Shared configuration for tetherly tools.
//!
//! One TOML file at the platform config path, overridable through
//! `TETHERLY_*` environment variables (nested keys split on `__`, e.g.
//! `TETHERLY_STORAGE__POLICY=surface`).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tetherly_core::voucher_code::DEFAULT_CODE_LENGTH;
use tetherly_core::{CreateVoucherRequest, PersistencePolicy, ShellCommands};

/// Voucher codes shorter than this collide too quickly to be useful.
const CODE_LENGTH: std::ops::RangeInclusive<usize> = 4..=16;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub storage: Storage,

    #[serde(default)]
    pub vouchers: VoucherDefaults,

    #[serde(default)]
    pub shell: Shell,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Where hotspot state lives between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Storage {
    /// Directory holding one JSON file per state key. Unset means the
    /// platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// `silent` ignores storage failures, `surface` reports them.
    #[serde(default)]
    pub policy: PersistencePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VoucherDefaults {
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    #[serde(default = "default_hours")]
    pub default_hours: u32,

    #[serde(default = "default_data_mb")]
    pub default_data_mb: u64,

    #[serde(default = "default_max_devices")]
    pub default_max_devices: u32,
}

impl Default for VoucherDefaults {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            default_hours: default_hours(),
            default_data_mb: default_data_mb(),
            default_max_devices: default_max_devices(),
        }
    }
}

impl VoucherDefaults {
    /// Request used when the caller overrides nothing.
    pub fn request(&self) -> CreateVoucherRequest {
        CreateVoucherRequest {
            duration_hours: self.default_hours,
            data_limit_mb: self.default_data_mb,
            max_devices: self.default_max_devices,
            note: None,
        }
    }
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}
fn default_hours() -> u32 {
    24
}
fn default_data_mb() -> u64 {
    1024
}
fn default_max_devices() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Shell {
    /// Wireless interface named in reference commands.
    #[serde(default = "default_interface")]
    pub interface: String,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            interface: default_interface(),
        }
    }
}

impl Shell {
    pub fn commands(&self) -> ShellCommands {
        ShellCommands::new(&self.interface)
    }
}

fn default_interface() -> String {
    tetherly_core::shell::DEFAULT_INTERFACE.into()
}

impl Config {
    /// Reject values no command could honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !CODE_LENGTH.contains(&self.vouchers.code_length) {
            return Err(invalid(
                "vouchers.code_length",
                format!(
                    "must be between {} and {}, got {}",
                    CODE_LENGTH.start(),
                    CODE_LENGTH.end(),
                    self.vouchers.code_length
                ),
            ));
        }
        if self.vouchers.default_hours == 0 {
            return Err(invalid("vouchers.default_hours", "must be at least 1"));
        }
        if self.vouchers.default_max_devices == 0 {
            return Err(invalid("vouchers.default_max_devices", "must be at least 1"));
        }
        if self.shell.interface.trim().is_empty() {
            return Err(invalid("shell.interface", "must not be empty"));
        }
        Ok(())
    }

    /// Storage directory: the configured one, else the platform default.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(data_dir)
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tetherly", "tetherly")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for persisted hotspot state.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn dirs_fallback(base: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(base);
    p.push("tetherly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not
/// an error; every field has a default.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TETHERLY_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.vouchers.code_length, 8);
        assert_eq!(config.shell.interface, "wlan0");
        assert_eq!(config.storage.policy, PersistencePolicy::Silent);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\npolicy = \"surface\"\ndata_dir = \"/srv/tetherly\"\n\n[vouchers]\ncode_length = 10\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.storage.policy, PersistencePolicy::Surface);
        assert_eq!(config.data_dir(), PathBuf::from("/srv/tetherly"));
        assert_eq!(config.vouchers.code_length, 10);
        assert_eq!(config.vouchers.default_hours, 24);
    }

    #[test]
    fn out_of_range_code_length_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[vouchers]\ncode_length = 2\n").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = Config::default();
        config.shell.interface = "ap0".into();
        config.vouchers.default_max_devices = 4;

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn voucher_defaults_build_request() {
        let request = VoucherDefaults::default().request();
        assert_eq!(request, CreateVoucherRequest::default());
    }
}
