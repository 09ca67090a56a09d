//! Error types for nemesix_app

use nemesix_animation::UnknownEasing;
use nemesix_core::CoreError;
use thiserror::Error;

/// Errors raised while loading and checking a page configuration
#[derive(Error, Debug)]
pub enum AppError {
    /// The configuration file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML or does not match the schema
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// A selector or root margin in the configuration does not parse
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An easing name that no curve answers to
    #[error(transparent)]
    InvalidEasing(#[from] UnknownEasing),
}

/// Result type for nemesix_app operations
pub type Result<T> = std::result::Result<T, AppError>;
