//! Configuration error types

/// Errors raised while configuring or mounting a grid.
///
/// These are construction-time failures; none of them occur during the
/// reload cycle.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The grid URL could not be parsed.
    #[error("invalid grid URL `{url}`: {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A grid with the same id is already mounted in the registry.
    #[error("a grid with id `{0}` is already mounted")]
    DuplicateId(String),

    /// A filter popup pattern failed to compile.
    #[error("invalid filter pattern for column `{column}`: {reason}")]
    InvalidPattern {
        /// The column the popup belongs to.
        column: String,
        /// Why the pattern failed to compile.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new invalid-URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid-pattern error.
    pub fn invalid_pattern(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            column: column.into(),
            reason: reason.into(),
        }
    }
}
