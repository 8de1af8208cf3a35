//! Error types for flag operations.

use thiserror::Error;

/// Result type for flag operations.
pub type FlagResult<T> = Result<T, FlagError>;

/// Flag-specific errors.
///
/// Lookups never fail (a flag with no matching provider resolves to
/// `false`/`None`), so the only fallible surface is write delegation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    /// No provider in the chain implements the mutable capability.
    #[error("no mutable configuration provider in the chain")]
    NoMutableProvider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let display = format!("{}", FlagError::NoMutableProvider);
        assert!(display.contains("no mutable configuration"));
    }
}
