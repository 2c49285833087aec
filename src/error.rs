//! Error types for the subscription registry.

use thiserror::Error;

/// Failure reported by a subscription store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Subscription not found: {0}")]
    NotFound(String),

    #[error("Subscription slug already exists: {0}")]
    DuplicateSlug(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: u32, got: u32 },

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),

    #[error("Store is locked by another process")]
    Locked,

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::encode::Error> for StoreError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for StoreError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        StoreError::Deserialization(e.to_string())
    }
}

/// Caller-facing outcome classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Malformed,
    ResultTooLarge,
    Internal,
}

impl ErrorKind {
    /// Conventional HTTP status a transport uses for this outcome.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Malformed => 400,
            ErrorKind::ResultTooLarge => 413,
            ErrorKind::Internal => 503,
        }
    }
}

/// Error returned by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Subscription not found: {0}")]
    NotFound(String),

    #[error("Subscription conflict: {0}")]
    Conflict(String),

    #[error("Malformed subscription: {0}")]
    Malformed(String),

    #[error("Error, exceeded the max limit as defined in config ({count} > {limit})")]
    ResultTooLarge { count: usize, limit: usize },

    #[error("Internal store error: {0}")]
    Internal(#[source] StoreError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::Conflict(_) => ErrorKind::Conflict,
            RegistryError::Malformed(_) => ErrorKind::Malformed,
            RegistryError::ResultTooLarge { .. } => ErrorKind::ResultTooLarge,
            RegistryError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(key) => RegistryError::NotFound(key),
            StoreError::DuplicateSlug(slug) => RegistryError::Conflict(slug),
            other => RegistryError::Internal(other),
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_classification() {
        let e: RegistryError = StoreError::NotFound("alpha".into()).into();
        assert_eq!(e.kind(), ErrorKind::NotFound);

        let e: RegistryError = StoreError::DuplicateSlug("alpha".into()).into();
        assert_eq!(e.kind(), ErrorKind::Conflict);

        let e: RegistryError = StoreError::Locked.into();
        assert_eq!(e.kind(), ErrorKind::Internal);

        let e: RegistryError = StoreError::Backend("connection reset".into()).into();
        assert!(matches!(e, RegistryError::Internal(StoreError::Backend(_))));
    }

    #[test]
    fn test_status_codes_are_distinct() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::Malformed,
            ErrorKind::ResultTooLarge,
            ErrorKind::Internal,
        ];
        let mut codes: Vec<u16> = kinds.iter().map(|k| k.status_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }
}
