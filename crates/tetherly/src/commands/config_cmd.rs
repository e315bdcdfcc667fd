//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use tetherly_core::PersistencePolicy;

use crate::cli::{ColorMode, ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

const KEYS: &[&str] = &[
    "defaults.output",
    "defaults.color",
    "storage.data_dir",
    "storage.policy",
    "vouchers.code_length",
    "vouchers.default_hours",
    "vouchers.default_data_mb",
    "vouchers.default_max_devices",
    "shell.interface",
];

// ── Helpers ─────────────────────────────────────────────────────────

/// TOML view of the resolved config, with the storage directory filled in.
fn format_config(cfg: &Config) -> String {
    let mut resolved = cfg.clone();
    resolved.storage.data_dir = Some(cfg.data_dir());
    toml::to_string_pretty(&resolved).unwrap_or_else(|e| format!("# unprintable config: {e}"))
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Apply one `key = value` assignment to `cfg`.
fn set_key(cfg: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "defaults.output" => {
            config::parse_enum::<OutputFormat>(key, value)?;
            cfg.defaults.output = value.to_ascii_lowercase();
        }
        "defaults.color" => {
            config::parse_enum::<ColorMode>(key, value)?;
            cfg.defaults.color = value.to_ascii_lowercase();
        }
        "storage.data_dir" => {
            cfg.storage.data_dir = (!value.trim().is_empty()).then(|| PathBuf::from(value));
        }
        "storage.policy" => {
            cfg.storage.policy =
                config::parse_setting::<PersistencePolicy>(key, value, "'silent' or 'surface'")?;
        }
        "vouchers.code_length" => {
            cfg.vouchers.code_length = config::parse_setting(key, value, "a number")?;
        }
        "vouchers.default_hours" => {
            cfg.vouchers.default_hours = config::parse_setting(key, value, "a number of hours")?;
        }
        "vouchers.default_data_mb" => {
            cfg.vouchers.default_data_mb = config::parse_setting(key, value, "a number of MB")?;
        }
        "vouchers.default_max_devices" => {
            cfg.vouchers.default_max_devices = config::parse_setting(key, value, "a number")?;
        }
        "shell.interface" => cfg.shell.interface = value.trim().to_owned(),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {}", KEYS.join(", ")),
            });
        }
    }
    cfg.validate()?;
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("tetherly configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            let data_dir: String = Input::new()
                .with_prompt("Data directory")
                .default(cfg.data_dir().display().to_string())
                .interact_text()
                .map_err(prompt_err)?;

            let policies = &[
                "silent  (keep going if saving fails)",
                "surface (report storage failures)",
            ];
            let policy = Select::new()
                .with_prompt("Storage failures")
                .items(policies)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let interface: String = Input::new()
                .with_prompt("Wireless interface")
                .default(cfg.shell.interface.clone())
                .interact_text()
                .map_err(prompt_err)?;

            let code_length: usize = Input::new()
                .with_prompt("Voucher code length")
                .default(cfg.vouchers.code_length)
                .interact_text()
                .map_err(prompt_err)?;

            cfg.storage.data_dir = Some(PathBuf::from(data_dir));
            cfg.storage.policy = if policy == 0 {
                PersistencePolicy::Silent
            } else {
                PersistencePolicy::Surface
            };
            cfg.shell.interface = interface.trim().to_owned();
            cfg.vouchers.code_length = code_length;
            cfg.validate()?;

            let path = config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("\n  Try it: tetherly devices list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(global.output_format(), &cfg, format_config, |_| {
                config::config_path().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            set_key(&mut cfg, &key, &value)?;
            config::save_config(&cfg)?;
            output::notice(&format!("✓ Set {key} = {value}"), global.quiet);
            Ok(())
        }
    }
}
