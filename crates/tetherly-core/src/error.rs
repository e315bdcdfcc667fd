// ── Core error types ──
//
// User-facing errors from tetherly-core. Store mutations themselves are
// total; these cover input validation, persistence and import failures.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Could not generate a unique voucher code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    // ── Import errors ────────────────────────────────────────────────
    #[error("Import failed: {message}")]
    Import { message: String },

    // ── Persistence errors ───────────────────────────────────────────
    #[error("Storage error for key '{key}': {message}")]
    Persistence { key: String, message: String },

    #[error("Storage writer has shut down")]
    WriterClosed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn persistence(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Persistence {
            key: key.into(),
            message: message.to_string(),
        }
    }
}
