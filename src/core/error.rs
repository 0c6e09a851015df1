//! Engine error types.
//!
//! Illegal moves are not errors: they surface as `changed == false` on the
//! move outcome. Errors are reserved for caller contract violations.

/// Errors returned by the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The grid configuration is inconsistent (dimensions, target, odds).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An input value outside the engine's closed vocabulary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
