//! CLI configuration: thin wrapper around `tetherly_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--output, --color, --data-dir, --ephemeral).

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::ValueEnum;

use tetherly_core::{FileStore, KeyValueStore, MemoryStore};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use tetherly_config::{Config, config_path, load_config, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill unset output/color flags from `[defaults]`. Flags win.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    if global.output.is_none() {
        global.output = Some(parse_enum::<OutputFormat>("defaults.output", &cfg.defaults.output)?);
    }
    if global.color.is_none() {
        global.color = Some(parse_enum::<ColorMode>("defaults.color", &cfg.defaults.color)?);
    }
    Ok(())
}

/// Parse a case-insensitive clap value name.
pub fn parse_enum<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|_| {
        let allowed: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_owned())
            .collect();
        CliError::Validation {
            field: field.into(),
            reason: format!("'{raw}' is not one of: {}", allowed.join(", ")),
        }
    })
}

/// Where state is read from and written to for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    Memory,
    Directory(PathBuf),
}

impl StorageTarget {
    /// Flag > env > config > platform default.
    pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Self {
        if global.ephemeral {
            return Self::Memory;
        }
        Self::Directory(global.data_dir.clone().unwrap_or_else(|| cfg.data_dir()))
    }

    pub fn backend(&self) -> Arc<dyn KeyValueStore> {
        match self {
            Self::Memory => Arc::new(MemoryStore::new()),
            Self::Directory(dir) => Arc::new(FileStore::new(dir)),
        }
    }
}

/// Parse a `config set` value for a typed field.
pub fn parse_setting<T: FromStr>(field: &str, raw: &str, expected: &str) -> Result<T, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}, got '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["tetherly"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["devices", "list"]);
        Cli::try_parse_from(argv).map(|cli| cli.global).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn flags_override_config_defaults() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();

        let mut from_config = global(&[]);
        apply_defaults(&mut from_config, &cfg).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(from_config.output_format(), OutputFormat::Yaml);

        let mut from_flag = global(&["--output", "json"]);
        apply_defaults(&mut from_flag, &cfg).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(from_flag.output_format(), OutputFormat::Json);
    }

    #[test]
    fn unknown_config_output_is_a_validation_error() {
        let mut cfg = Config::default();
        cfg.defaults.output = "xml".into();
        let mut opts = global(&[]);
        assert!(matches!(
            apply_defaults(&mut opts, &cfg),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn ephemeral_wins_over_config_dir() {
        let mut cfg = Config::default();
        cfg.storage.data_dir = Some("/srv/tetherly".into());
        assert_eq!(
            StorageTarget::resolve(&global(&["--ephemeral"]), &cfg),
            StorageTarget::Memory
        );
        assert_eq!(
            StorageTarget::resolve(&global(&[]), &cfg),
            StorageTarget::Directory("/srv/tetherly".into())
        );
    }
}
