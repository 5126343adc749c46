//! Error types

/// Errors raised by the widget utilities.
#[derive(Debug, thiserror::Error)]
pub enum ExpaaandError {
    /// The class name contains whitespace, so it is not a single class token.
    #[error("expected a single class name, got {0:?}")]
    InvalidClassName(String),

    /// The fallback class pattern failed to compile.
    #[error("invalid class pattern: {0}")]
    Pattern(#[from] regex::Error),
}
