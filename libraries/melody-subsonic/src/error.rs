//! Error types for the Subsonic client.

use melody_core::CatalogError;
use thiserror::Error;

/// Errors that can occur when interacting with a Subsonic server.
#[derive(Error, Debug)]
pub enum SubsonicError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no session available
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (wrong credentials or token auth unsupported)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Requested entity does not exist on the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Subsonic envelope reported `status: failed`
    #[error("Subsonic error {code}: {message}")]
    Api { code: u32, message: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for Subsonic client operations.
pub type Result<T> = std::result::Result<T, SubsonicError>;

impl SubsonicError {
    /// Map a Subsonic API error code to the matching variant.
    ///
    /// Codes from the Subsonic API reference: 40 wrong credentials,
    /// 41 token auth unsupported, 44 invalid API key, 70 data not found.
    pub fn from_api(code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            40 | 41 | 44 => Self::AuthFailed(message),
            70 => Self::NotFound(message),
            _ => Self::Api { code, message },
        }
    }

    /// Classify a transport error
    pub(crate) fn transport(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

impl From<SubsonicError> for CatalogError {
    fn from(err: SubsonicError) -> Self {
        match err {
            SubsonicError::AuthRequired => CatalogError::NotAuthenticated,
            SubsonicError::NotFound(what) => CatalogError::InvalidReference(what),
            other => CatalogError::CatalogUnavailable(other.to_string()),
        }
    }
}
