/// JWT token generation and validation module
///
/// Tokens are signed using HS256 (HMAC-SHA256). Access and refresh tokens are
/// signed with different secrets, so a leaked access secret cannot mint
/// refresh tokens and vice versa.
///
/// # Token Types
///
/// - **Access Token**: 15 minutes, authorizes API requests
/// - **Refresh Token**: 7 days, exchanged at `/auth/refresh` for a new access token
///
/// Validation runs with zero leeway: a token is rejected from the second its
/// `exp` has passed.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::jwt::{create_token, validate_access_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// let claims = Claims::new(user_id, TokenType::Access);
/// let token = create_token(&claims, "access-secret")?;
///
/// let validated = validate_access_token(&token, "access-secret")?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped on every token
pub const ISSUER: &str = "taskdeck";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature, issuer, or format check failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token is valid but of the other type
    #[error("Expected {expected} token, got {actual} token")]
    WrongTokenType {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Token type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token (short-lived, 15 minutes)
    Access,

    /// Refresh token (long-lived, 7 days)
    Refresh,
}

impl TokenType {
    /// Gets default expiration duration for token type
    pub fn default_expiration(&self) -> Duration {
        match self {
            TokenType::Access => Duration::minutes(15),
            TokenType::Refresh => Duration::days(7),
        }
    }

    /// Gets token type as string
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// JWT claims structure
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "taskdeck")
/// - `iat`, `nbf`, `exp`: Unix timestamps
/// - `jti`: Random token ID, so tokens issued in the same second still differ
///
/// # Custom Claims
///
/// - `token_type`: Access or refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer - Always "taskdeck"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Token ID
    pub jti: Uuid,

    /// Token type (custom claim)
    pub token_type: TokenType,
}

impl Claims {
    /// Creates new claims issued now with the default expiration for the type
    pub fn new(user_id: Uuid, token_type: TokenType) -> Self {
        Self::issued_at(user_id, token_type, Utc::now())
    }

    /// Creates claims as if issued at `issued_at`
    ///
    /// Expiration is `issued_at` plus the default lifetime of `token_type`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use taskdeck_shared::auth::jwt::{Claims, TokenType};
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::issued_at(
    ///     Uuid::new_v4(),
    ///     TokenType::Access,
    ///     Utc::now() - Duration::minutes(20),
    /// );
    /// assert!(claims.is_expired());
    /// ```
    pub fn issued_at(user_id: Uuid, token_type: TokenType, issued_at: DateTime<Utc>) -> Self {
        Self::with_expiration_from(user_id, token_type, issued_at, token_type.default_expiration())
    }

    /// Creates claims issued now with a custom expiration
    pub fn with_expiration(user_id: Uuid, token_type: TokenType, expires_in: Duration) -> Self {
        Self::with_expiration_from(user_id, token_type, Utc::now(), expires_in)
    }

    fn with_expiration_from(
        user_id: Uuid,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_in: Duration,
    ) -> Self {
        let expiration = issued_at + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            nbf: issued_at.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Freshly issued access/refresh pair for one user
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Access token (15m)
    pub access_token: String,

    /// Refresh token (7d)
    pub refresh_token: String,
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 with the provided secret.
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token creation fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies signature, expiration, not-before, and issuer. Does not look at
/// the token type; use [`validate_access_token`] or [`validate_refresh_token`].
///
/// # Errors
///
/// - `JwtError::Expired` if `exp` has passed
/// - `JwtError::ValidationError` for every other failure
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

fn validate_typed(token: &str, secret: &str, expected: TokenType) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != expected {
        return Err(JwtError::WrongTokenType {
            expected: expected.as_str(),
            actual: claims.token_type.as_str(),
        });
    }

    Ok(claims)
}

/// Validates token and checks it's an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Access)
}

/// Validates token and checks it's a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Refresh)
}

/// Creates a new access token for `user_id`
pub fn issue_access_token(user_id: Uuid, access_secret: &str) -> Result<String, JwtError> {
    create_token(&Claims::new(user_id, TokenType::Access), access_secret)
}

/// Issues an access token and a refresh token for `user_id`
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::jwt::{issue_token_pair, validate_refresh_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pair = issue_token_pair(Uuid::new_v4(), "access-secret", "refresh-secret")?;
/// validate_refresh_token(&pair.refresh_token, "refresh-secret")?;
/// # Ok(())
/// # }
/// ```
pub fn issue_token_pair(
    user_id: Uuid,
    access_secret: &str,
    refresh_secret: &str,
) -> Result<TokenPair, JwtError> {
    let access_token = issue_access_token(user_id, access_secret)?;
    let refresh_token = create_token(&Claims::new(user_id, TokenType::Refresh), refresh_secret)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}
