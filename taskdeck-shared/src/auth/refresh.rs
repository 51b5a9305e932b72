/// Server-side refresh token checks
///
/// A refresh token is only exchangeable while its digest is the one stored on
/// the user record. The stored value is the SHA-256 hex digest of the token,
/// written on login/registration and set to NULL on logout.
///
/// ```text
/// login #1  -> stored = H(t1)        t1 exchangeable
/// login #2  -> stored = H(t2)        t1 rejected (mismatch), t2 exchangeable
/// logout    -> stored = NULL         t2 rejected (revoked)
/// ```
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::refresh::{hash_refresh_token, verify_stored_refresh_token};
///
/// let stored = hash_refresh_token("token-1");
/// assert!(verify_stored_refresh_token("token-1", Some(&stored)).is_ok());
/// assert!(verify_stored_refresh_token("token-2", Some(&stored)).is_err());
/// assert!(verify_stored_refresh_token("token-1", None).is_err());
/// ```

use sha2::{Digest, Sha256};

/// Reasons a signature-valid refresh token is still refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RefreshTokenError {
    /// The user has no stored refresh token (logged out)
    #[error("Refresh token has been revoked")]
    Revoked,

    /// A different refresh token is stored (superseded by a later login)
    #[error("Refresh token does not match the stored token")]
    Mismatch,
}

/// Hashes a refresh token for storage (SHA-256, lowercase hex)
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares two strings in constant time (for equal lengths)
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Checks a presented refresh token against the stored digest
///
/// # Errors
///
/// - `RefreshTokenError::Revoked` when nothing is stored
/// - `RefreshTokenError::Mismatch` when the digests differ
pub fn verify_stored_refresh_token(
    presented: &str,
    stored_hash: Option<&str>,
) -> Result<(), RefreshTokenError> {
    let stored_hash = stored_hash.ok_or(RefreshTokenError::Revoked)?;

    if constant_time_compare(&hash_refresh_token(presented), stored_hash) {
        Ok(())
    } else {
        Err(RefreshTokenError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{issue_token_pair, validate_refresh_token};
    use uuid::Uuid;

    const ACCESS_SECRET: &str = "test-access-secret-at-least-32-bytes";
    const REFRESH_SECRET: &str = "test-refresh-secret-at-least-32-bytes";

    #[test]
    fn test_hash_refresh_token() {
        let hash = hash_refresh_token("abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash, hash_refresh_token("abc"));
        assert_ne!(hash, hash_refresh_token("abd"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hello2"));
        assert!(!constant_time_compare("", "not empty"));
    }

    #[test]
    fn test_matching_token_accepted() {
        let pair = issue_token_pair(Uuid::new_v4(), ACCESS_SECRET, REFRESH_SECRET).unwrap();
        let stored = hash_refresh_token(&pair.refresh_token);

        assert_eq!(
            verify_stored_refresh_token(&pair.refresh_token, Some(&stored)),
            Ok(())
        );
    }

    #[test]
    fn test_cleared_token_rejected() {
        let pair = issue_token_pair(Uuid::new_v4(), ACCESS_SECRET, REFRESH_SECRET).unwrap();

        assert_eq!(
            verify_stored_refresh_token(&pair.refresh_token, None),
            Err(RefreshTokenError::Revoked)
        );
    }

    #[test]
    fn test_superseded_token_rejected_despite_valid_signature() {
        let user_id = Uuid::new_v4();
        let first = issue_token_pair(user_id, ACCESS_SECRET, REFRESH_SECRET).unwrap();
        let second = issue_token_pair(user_id, ACCESS_SECRET, REFRESH_SECRET).unwrap();
        let stored = hash_refresh_token(&second.refresh_token);

        // The first token still carries a valid signature...
        assert!(validate_refresh_token(&first.refresh_token, REFRESH_SECRET).is_ok());

        // ...but it is no longer the stored one.
        assert_eq!(
            verify_stored_refresh_token(&first.refresh_token, Some(&stored)),
            Err(RefreshTokenError::Mismatch)
        );
        assert!(verify_stored_refresh_token(&second.refresh_token, Some(&stored)).is_ok());
    }
}
