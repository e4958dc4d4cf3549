//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for sqlweave operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while configuring a builder or assembling a statement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// ORDER BY direction that is neither ASC, DESC nor empty
    #[error("Invalid direction \"{0}\" in ORDER BY")]
    InvalidDirection(String),

    /// Number of `?` placeholders does not match the supplied arguments
    #[error(
        "Placeholder mismatch in {clause}: `{expr}` has {placeholders} placeholder(s) but {args} argument(s) were bound"
    )]
    PlaceholderMismatch {
        clause: &'static str,
        expr: String,
        placeholders: usize,
        args: usize,
    },

    /// Statement lacks a clause it cannot be rendered without
    #[error("Incomplete {statement} statement: {reason}")]
    Incomplete {
        statement: &'static str,
        reason: String,
    },

    /// Driver name that does not map to any dialect
    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl SqlError {
    /// Create a placeholder/argument arity error for a clause
    pub fn placeholder_mismatch(
        clause: &'static str,
        expr: impl Into<String>,
        placeholders: usize,
        args: usize,
    ) -> Self {
        Self::PlaceholderMismatch {
            clause,
            expr: expr.into(),
            placeholders,
            args,
        }
    }

    /// Create an incomplete statement error
    pub fn incomplete(statement: &'static str, reason: impl Into<String>) -> Self {
        Self::Incomplete {
            statement,
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this error was raised by a dialect check on ORDER BY
    pub fn is_invalid_direction(&self) -> bool {
        matches!(self, Self::InvalidDirection(_))
    }

    /// Check if this is a placeholder arity error
    pub fn is_placeholder_mismatch(&self) -> bool {
        matches!(self, Self::PlaceholderMismatch { .. })
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_direction_message_names_the_token() {
        let err = SqlError::InvalidDirection("sideways".to_string());
        assert_eq!(err.to_string(), "Invalid direction \"sideways\" in ORDER BY");
        assert!(err.is_invalid_direction());
    }

    #[test]
    fn placeholder_mismatch_mentions_clause() {
        let err = SqlError::placeholder_mismatch("WHERE", "a = ? AND b = ?", 2, 3);
        let msg = err.to_string();
        assert!(msg.starts_with("Placeholder mismatch in WHERE"));
        assert!(msg.contains("2 placeholder(s)"));
        assert!(msg.contains("3 argument(s)"));
    }
}
