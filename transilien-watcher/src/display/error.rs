//! Display error types.

use std::path::PathBuf;

/// Errors from selecting or driving an output device.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The configured device type has no implementation
    #[error("display type {0:?} is not supported (expected \"console\" or \"lcd\")")]
    UnsupportedType(String),

    /// Writing to standard output failed
    #[error("console write failed: {0}")]
    Console(#[source] std::io::Error),

    /// Opening or writing the character device failed
    #[error("LCD device {path} write failed: {source}")]
    Lcd {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DisplayError::UnsupportedType("foo".into());
        assert_eq!(
            err.to_string(),
            "display type \"foo\" is not supported (expected \"console\" or \"lcd\")"
        );

        let err = DisplayError::Lcd {
            path: PathBuf::from("/dev/lcd"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("LCD device /dev/lcd write failed"));
    }
}
