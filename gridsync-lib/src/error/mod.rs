//! Error types

mod config;
mod fetch;

pub use config::*;
pub use fetch::*;

/// Top-level error type for grid operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration or mounting failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fetch failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
