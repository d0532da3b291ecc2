use sqlx::SqlitePool;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::User;
use crate::error::ServiceError;

impl User {
    /// Create a new user with a hashed password. The UNIQUE constraint on
    /// `username` is what arbitrates concurrent registrations.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<User, ServiceError> {
        let hash = hash_password(password).map_err(ServiceError::Credential)?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash, default_city
            "#,
        )
        .bind(username)
        .bind(&hash)
        .fetch_one(db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ServiceError::DuplicateUser
            }
            _ => ServiceError::Storage(e),
        })?;
        Ok(user)
    }

    /// Find a user by username.
    pub async fn find_by_username(
        db: &SqlitePool,
        username: &str,
    ) -> Result<User, ServiceError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, default_city
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or(ServiceError::UserNotFound)
    }

    /// Check a username/password pair. Unknown user and wrong password
    /// collapse into the same error so the response does not reveal which
    /// one failed.
    pub async fn authenticate(
        db: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<User, ServiceError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, default_city
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        match user {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            _ => Err(ServiceError::InvalidCredentials),
        }
    }

    /// Overwrite the default city, last write wins.
    pub async fn set_default_city(
        db: &SqlitePool,
        username: &str,
        city: &str,
    ) -> Result<(), ServiceError> {
        let user = Self::find_by_username(db, username).await?;
        sqlx::query("UPDATE users SET default_city = ? WHERE id = ?")
            .bind(city)
            .bind(user.id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Remove a user and every history row it owns, in one transaction.
    /// A user row must never outlive its history or the other way round.
    pub async fn delete(db: &SqlitePool, username: &str) -> Result<(), ServiceError> {
        let user = Self::find_by_username(db, username).await?;
        let mut tx = db.begin().await?;
        sqlx::query("DELETE FROM history WHERE user_id = ?")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
