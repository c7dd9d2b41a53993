//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading or validating the configuration.
///
/// All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist
    #[error("configuration file {0} not found")]
    NotFound(PathBuf),

    /// The configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML, or a value has the wrong shape
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be coerced to the expected type
    #[error("environment variable {key}={value:?} is not a valid {expected}")]
    Override {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// A value parsed but breaks a constraint
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
