/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     name TEXT NOT NULL,
///     refresh_token_hash TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `refresh_token_hash` holds the digest of the one refresh token currently
/// allowed for this user (see [`crate::auth::refresh`]). NULL means logged out.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     name: "Jane Doe".to_string(),
/// }).await?;
///
/// let found = User::find_by_email(&pool, "user@example.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User account
///
/// Not serializable on purpose: use [`UserProfile`] for anything that leaves
/// the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Email address, lower-cased, unique
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Display name
    pub name: String,

    /// SHA-256 digest of the current refresh token
    pub refresh_token_hash: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address (callers normalize it first)
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Display name
    pub name: String,
}

const USER_COLUMNS: &str =
    "id, email, password_hash, name, refresh_token_hash, created_at, updated_at";

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Fails with a database error carrying the `users_email_key` constraint
    /// when the email is already taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.name)
            .fetch_one(pool)
            .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a user by (already normalized) email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replaces the stored refresh token digest
    ///
    /// Any refresh token issued before this call stops being exchangeable.
    ///
    /// # Returns
    ///
    /// True if the user exists
    pub async fn store_refresh_token(
        pool: &PgPool,
        id: Uuid,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clears the stored refresh token digest (logout)
    ///
    /// # Returns
    ///
    /// True if the user exists
    pub async fn clear_refresh_token(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user and, by cascade, all of their tasks
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Normalizes an email for storage and lookup
///
/// ```
/// use taskdeck_shared::models::user::normalize_email;
///
/// assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            name: "Test User".to_string(),
            refresh_token_hash: Some("digest".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_hides_secrets() {
        let user = sample_user();
        let profile = UserProfile::from(&user);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["name"], "Test User");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token_hash").is_none());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("USER@Example.com"), "user@example.com");
        assert_eq!(normalize_email("\tuser@example.com\n"), "user@example.com");
    }
}
