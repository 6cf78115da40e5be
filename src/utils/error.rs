//! Error handling for placefmt
//!
//! This module provides a unified error type and result type for lexing,
//! placeholder resolution, formatter configuration and expression
//! evaluation.

use thiserror::Error;

/// Broad classification of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed placeholder or expression
    Syntax,
    /// Argument index out of bounds, or mixed indexing styles
    Index,
    /// Unknown namespace or key that no interpreter recognises
    Resolution,
    /// A value formatter rejected its spec
    FormatterSpec,
}

/// Formatting error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The lexer entered its error state
    #[error("invalid format string at byte {position}: {token:?}")]
    InvalidPattern { position: usize, token: String },

    /// The pattern ended inside a placeholder or expression
    #[error("unterminated placeholder at end of pattern")]
    UnterminatedPlaceholder,

    /// Malformed expression or placeholder content
    #[error("syntax error: {0}")]
    Syntax(String),

    /// An operator character that is not registered
    #[error("unknown operator: {0}")]
    UnknownOperator(char),

    /// Explicit and implicit argument indexing used in the same call
    #[error("cannot mix indexed and non-indexed placeholders")]
    MixedIndexing,

    /// Argument index beyond the supplied arguments
    #[error("argument index {index} out of range ({len} arguments)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No interpreter registered for a namespace
    #[error("unknown namespace: {0:?}")]
    UnknownNamespace(String),

    /// An interpreter does not know a key
    #[error("unresolved key: {0}")]
    UnresolvedKey(String),

    /// A value formatter could not parse its spec
    #[error("invalid formatter spec {spec:?}: {reason}")]
    FormatterSpec { spec: String, reason: String },
}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;

// Convenience constructors for errors
impl FormatError {
    pub fn syntax(message: impl Into<String>) -> Self {
        FormatError::Syntax(message.into())
    }

    pub fn invalid_pattern(position: usize, token: impl Into<String>) -> Self {
        FormatError::InvalidPattern {
            position,
            token: token.into(),
        }
    }

    pub fn out_of_range(index: usize, len: usize) -> Self {
        FormatError::IndexOutOfRange { index, len }
    }

    pub fn unknown_namespace(namespace: impl Into<String>) -> Self {
        FormatError::UnknownNamespace(namespace.into())
    }

    pub fn unresolved(key: impl Into<String>) -> Self {
        FormatError::UnresolvedKey(key.into())
    }

    pub fn formatter_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        FormatError::FormatterSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormatError::InvalidPattern { .. }
            | FormatError::UnterminatedPlaceholder
            | FormatError::Syntax(_)
            | FormatError::UnknownOperator(_) => ErrorKind::Syntax,
            FormatError::MixedIndexing | FormatError::IndexOutOfRange { .. } => ErrorKind::Index,
            FormatError::UnknownNamespace(_) | FormatError::UnresolvedKey(_) => {
                ErrorKind::Resolution
            }
            FormatError::FormatterSpec { .. } => ErrorKind::FormatterSpec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let err = FormatError::invalid_pattern(3, "ab");
        let msg = err.to_string();
        assert!(msg.contains("byte 3"));
        assert!(msg.contains("\"ab\""));
    }

    #[test]
    fn test_out_of_range_display() {
        let msg = FormatError::out_of_range(5, 1).to_string();
        assert!(msg.contains("index 5"));
        assert!(msg.contains("1 arguments"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(FormatError::UnterminatedPlaceholder.kind(), ErrorKind::Syntax);
        assert_eq!(FormatError::UnknownOperator('-').kind(), ErrorKind::Syntax);
        assert_eq!(FormatError::MixedIndexing.kind(), ErrorKind::Index);
        assert_eq!(FormatError::unresolved("hello").kind(), ErrorKind::Resolution);
        assert_eq!(
            FormatError::formatter_spec("x", "bad").kind(),
            ErrorKind::FormatterSpec
        );
    }
}
