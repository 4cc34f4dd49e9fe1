//! Error types for the registry client.

use ark_anvl::{IdentifierError, ParseError};

/// Registry errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The response decoded but carried no success indicator.
    #[error("registry response has no success indicator: {body:?}")]
    Rejected {
        /// Raw response body
        body: String,
    },

    /// The registry answered with an `error:` element.
    #[error("registry error: {reason}")]
    Failed {
        /// Reason given by the registry
        reason: String,
        /// Raw response body
        body: String,
    },

    /// The response body is not valid ANVL.
    #[error("malformed registry response: {source}")]
    MalformedResponse {
        /// Raw response body
        body: String,
        /// Decoder failure
        source: ParseError,
    },

    /// The request never produced a response.
    #[error("network error: {message}")]
    Network {
        /// Transport failure description
        message: String,
    },

    /// Non-success HTTP status with a body that explains nothing.
    #[error("unexpected HTTP status {status}: {body:?}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The session file could not be read, written or removed.
    #[error("session error: {message}")]
    Session {
        /// Failure description
        message: String,
    },

    /// The target identifier did not resolve.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}

impl RegistryError {
    /// Creates a `Network` error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a `Session` error.
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Returns the raw response body, if the registry answered at all.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body }
            | Self::Failed { body, .. }
            | Self::MalformedResponse { body, .. }
            | Self::Http { body, .. } => Some(body),
            Self::Network { .. } | Self::Session { .. } | Self::Identifier(_) => None,
        }
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
