/// Authentication utilities
///
/// This module provides the authentication primitives for Taskdeck:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing
/// - [`jwt`]: Access/refresh JWT generation and validation
/// - [`refresh`]: Server-side refresh token storage checks
/// - [`middleware`]: Bearer token extraction and request auth context
///
/// # Session Model
///
/// - **Access Token**: HS256, 15 minutes, sent as `Authorization: Bearer`
/// - **Refresh Token**: HS256 with its own secret, 7 days, sent as an
///   HTTP-only cookie. Its SHA-256 digest is stored on the user record, so
///   logging out (clearing the digest) or logging in again (overwriting it)
///   revokes every earlier refresh token.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
/// use taskdeck_shared::auth::jwt::{create_token, validate_access_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), TokenType::Access);
/// let token = create_token(&claims, "access-secret")?;
/// validate_access_token(&token, "access-secret")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod refresh;
