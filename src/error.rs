//! Error types for the chime CLI.
//!
//! Uses thiserror for derive macros. Hook commands absorb every variant
//! except `Blocked`; see `commands::run_hook`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for chime operations.
#[derive(Error, Debug)]
pub enum ChimeError {
    /// User provided invalid arguments or the system is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// The hook event on stdin was missing or not valid JSON.
    #[error("Invalid hook input: {0}")]
    InputError(String),

    /// The configuration file could not be read or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Lock could not be acquired.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    /// The hook refused the requested action.
    #[error("{0}")]
    Blocked(String),
}

impl ChimeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChimeError::UserError(_) | ChimeError::InputError(_) | ChimeError::ConfigError(_) => {
                exit_codes::USER_ERROR
            }
            ChimeError::LockError(_) => exit_codes::LOCK_FAILURE,
            ChimeError::Blocked(_) => exit_codes::BLOCKED,
        }
    }

    /// Whether this error must reach the agent runtime even from a fail-open hook.
    pub fn is_blocking(&self) -> bool {
        matches!(self, ChimeError::Blocked(_))
    }
}

/// Result type alias for chime operations.
pub type Result<T> = std::result::Result<T, ChimeError>;
