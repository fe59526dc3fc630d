use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("match {0} already exists")]
    DuplicateMatch(u32),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// The user-facing class of an error, shown next to its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    DuplicateMatch,
    NotFound,
    Storage,
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::Config(_) => ErrorCategory::Validation,
            Self::DuplicateMatch(_) => ErrorCategory::DuplicateMatch,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Storage(_) | Self::Database(_) | Self::Serialization(_) | Self::Io(_) => {
                ErrorCategory::Storage
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::DuplicateMatch => "duplicate match",
            Self::NotFound => "not found",
            Self::Storage => "storage",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_groups_adapter_failures_as_storage() {
        let io = Error::from(std::io::Error::other("disk full"));
        assert_eq!(io.category(), ErrorCategory::Storage);
        assert_eq!(
            Error::Storage("capacity exceeded".into()).category(),
            ErrorCategory::Storage
        );
        assert_eq!(Error::DuplicateMatch(3).category(), ErrorCategory::DuplicateMatch);
        assert_eq!(Error::Config("bad".into()).category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_duplicate_match_message() {
        assert_eq!(Error::DuplicateMatch(12).to_string(), "match 12 already exists");
    }
}
