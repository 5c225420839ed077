use std::num::ParseIntError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SHA-1 hashing is unavailable")]
    HashingUnavailable,

    #[error("invalid range prefix {prefix:?}, expected 5 uppercase hex characters")]
    InvalidPrefix { prefix: String },

    #[error("invalid user agent {user_agent:?}")]
    InvalidUserAgent { user_agent: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP request failed for prefix {prefix}: {source}")]
    HttpRequest {
        prefix: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for prefix {prefix}")]
    HttpStatus { prefix: String, status: u16 },

    #[error("malformed range record {line:?}, expected SUFFIX:COUNT")]
    MalformedRecord { line: String },

    #[error("invalid count in range record {line:?}: {source}")]
    InvalidCount {
        line: String,
        #[source]
        source: ParseIntError,
    },
}

/// Coarse classification of a failed breach check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The fingerprint could not be computed.
    HashingUnavailable,
    /// The range request did not complete or returned a non-success status.
    TransportFailure,
    /// The range response body could not be parsed.
    ParseFailure,
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::HashingUnavailable => FailureKind::HashingUnavailable,
            Error::InvalidPrefix { .. }
            | Error::InvalidUserAgent { .. }
            | Error::ClientBuild(_)
            | Error::HttpRequest { .. }
            | Error::HttpStatus { .. } => FailureKind::TransportFailure,
            Error::MalformedRecord { .. } | Error::InvalidCount { .. } => FailureKind::ParseFailure,
        }
    }
}
