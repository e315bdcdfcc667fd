//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tetherly_config::ConfigError;
use tetherly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(tetherly::not_found),
        help("Run: tetherly {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Could not mint a unique voucher code after {attempts} attempts")]
    #[diagnostic(
        code(tetherly::code_space_exhausted),
        help(
            "Delete unused vouchers or raise the code length:\n\
             tetherly config set vouchers.code_length 10"
        )
    )]
    CodeSpaceExhausted { attempts: u32 },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tetherly::validation))]
    Validation { field: String, reason: String },

    #[error("Import rejected: {message}")]
    #[diagnostic(
        code(tetherly::import),
        help(
            "The bundle must be a JSON object with hotspotConfig, devices and vouchers.\n\
             Produce one with: tetherly export --file backup.json"
        )
    )]
    Import { message: String },

    // ── Storage ──────────────────────────────────────────────────────

    #[error("Storage error for '{key}': {message}")]
    #[diagnostic(
        code(tetherly::storage),
        help(
            "Check that the data directory is writable, or run with --ephemeral.\n\
             Set storage.policy = \"silent\" to continue past storage failures."
        )
    )]
    Storage { key: String, message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(tetherly::config),
        help("Inspect the configuration with: tetherly config show")
    )]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(tetherly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(tetherly::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::CodeSpaceExhausted { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::Import { .. } | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    pub fn not_found(resource_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: format!("{resource_type}s list"),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::not_found(&entity_type, identifier),

            CoreError::CodeSpaceExhausted { attempts } => CliError::CodeSpaceExhausted { attempts },

            CoreError::Import { message } => CliError::Import { message },

            CoreError::Persistence { key, message } => CliError::Storage { key, message },

            CoreError::WriterClosed => CliError::Storage {
                key: "*".into(),
                message: "background writer stopped unexpectedly".into(),
            },

            CoreError::Serialization(e) => CliError::Json(e),

            CoreError::Io(e) => CliError::Io(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
