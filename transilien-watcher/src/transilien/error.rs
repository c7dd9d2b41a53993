//! Transilien client error types.

use crate::domain::InvalidMission;

/// Errors from fetching a departure board.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connection refused, timeout, etc.)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Credentials were rejected
    #[error("unauthorized: check api.user and api.password")]
    Unauthorized,

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body is not valid text in the configured encoding
    #[error("response body is not valid {encoding}")]
    Decode { encoding: &'static str },

    /// The configured encoding label is not a known text encoding
    #[error("unknown text encoding {0:?}")]
    UnknownEncoding(String),
}

/// Errors that fail a whole departure board.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document is not well-formed XML
    #[error("malformed schedule document: {0}")]
    Malformed(#[from] roxmltree::Error),
}

/// Problems with a single train in an otherwise readable board.
///
/// These are logged and the train is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntryError {
    /// A required child element is absent or empty
    #[error("missing <{0}> element")]
    Missing(&'static str),

    /// The mission code is not valid
    #[error(transparent)]
    Mission(#[from] InvalidMission),

    /// The scheduled time does not match the configured format
    #[error("unparseable time {value:?}: {source}")]
    Time {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
