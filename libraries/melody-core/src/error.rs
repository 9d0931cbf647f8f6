//! Error types for catalog access
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures a catalog service can report to the engine
///
/// The engine never treats these as fatal: a failed page fetch leaves the
/// pager untouched and a failed stream lookup is handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Network, authentication or parse failure while talking to the server
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// No session has been established with the server
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The song id is unknown to the server
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl CatalogError {
    /// Create a catalog-unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::CatalogUnavailable(msg.into())
    }

    /// Create an invalid-reference error
    pub fn invalid_reference(id: impl Into<String>) -> Self {
        Self::InvalidReference(id.into())
    }

    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::CatalogUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CatalogError::unavailable("timeout").to_string(),
            "Catalog unavailable: timeout"
        );
        assert_eq!(CatalogError::NotAuthenticated.to_string(), "Not authenticated");
        assert_eq!(
            CatalogError::invalid_reference("tr-9").to_string(),
            "Invalid reference: tr-9"
        );
    }

    #[test]
    fn only_unavailable_is_transient() {
        assert!(CatalogError::unavailable("x").is_transient());
        assert!(!CatalogError::NotAuthenticated.is_transient());
        assert!(!CatalogError::invalid_reference("x").is_transient());
    }
}
