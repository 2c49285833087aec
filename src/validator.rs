//! Stateless checks applied by the registry.
//!
//! Slug uniqueness is not checked here: the store enforces it atomically on
//! insert.

use crate::error::{RegistryError, Result, StoreError};
use crate::store::StoreResult;
use crate::types::Subscription;

/// Fail with `ResultTooLarge` when `count` exceeds `limit`.
pub fn check_result_size(count: usize, limit: usize) -> Result<()> {
    if count > limit {
        return Err(RegistryError::ResultTooLarge { count, limit });
    }
    Ok(())
}

/// Classify a keyed store lookup. Absence becomes `NotFound` for `key`; any
/// other store failure is classified as usual.
pub fn require_exists<T>(lookup: StoreResult<T>, key: &str) -> Result<T> {
    match lookup {
        Ok(found) => Ok(found),
        Err(StoreError::NotFound(_)) => Err(RegistryError::NotFound(key.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Reject candidates that cannot be keyed.
pub fn validate_candidate(candidate: &Subscription) -> Result<()> {
    if candidate.slug.is_empty() {
        return Err(RegistryError::Malformed("slug must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_result_size_at_limit() {
        assert!(check_result_size(10, 10).is_ok());
        assert!(check_result_size(0, 0).is_ok());
    }

    #[test]
    fn test_result_size_over_limit() {
        let err = check_result_size(11, 10).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ResultTooLarge { count: 11, limit: 10 }
        ));
    }

    #[test]
    fn test_require_exists() {
        assert_eq!(require_exists(Ok(3), "k").unwrap(), 3);

        let err = require_exists::<u8>(Err(StoreError::NotFound("x".into())), "missing")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("missing"));

        let err = require_exists::<u8>(Err(StoreError::Locked), "k").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_validate_candidate() {
        assert!(validate_candidate(&Subscription::new("ok", "r")).is_ok());

        let err = validate_candidate(&Subscription::new("", "r")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
