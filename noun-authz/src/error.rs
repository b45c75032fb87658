//! Error types for noun configuration and setup
//!
//! Authorization queries never fail. The only failure surfaces are the
//! deferred setup run and loading a declarative policy.

use thiserror::Error;

/// Error raised by a deferred setup hook.
///
/// Hooks are extension code, so any error type is accepted.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Noun error types.
#[derive(Debug, Error)]
pub enum NounError {
    /// A deferred setup hook failed; hooks after it did not run.
    #[error("Setup of noun '{noun}' aborted at hook {hook}: {source}")]
    SetupAborted {
        /// Name of the noun being set up.
        noun: String,
        /// Zero-based index of the failing hook.
        hook: usize,
        /// The error returned by the hook.
        #[source]
        source: HookError,
    },

    /// Policy document could not be parsed
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Missing required environment variable
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Result type for noun operations.
pub type NounResult<T> = Result<T, NounError>;

impl NounError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            NounError::SetupAborted { .. } => "SETUP_ABORTED",
            NounError::InvalidPolicy(_) => "INVALID_POLICY",
            NounError::MissingEnvVar(_) => "MISSING_ENV_VAR",
        }
    }

    /// Check if this error came from extension code rather than configuration input.
    pub fn is_hook_failure(&self) -> bool {
        matches!(self, NounError::SetupAborted { .. })
    }
}

impl From<serde_json::Error> for NounError {
    fn from(err: serde_json::Error) -> Self {
        NounError::InvalidPolicy(err.to_string())
    }
}
