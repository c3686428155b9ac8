//! Error types for glint_effects
//!
//! Only configuration problems are errors. Missing elements, unparsable
//! counters and narrow viewports degrade to "no animation" and are logged.

use thiserror::Error;

/// Errors that can occur while configuring the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text is not valid TOML for `EngineConfig`
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for glint_effects operations
pub type Result<T> = std::result::Result<T, EngineError>;
