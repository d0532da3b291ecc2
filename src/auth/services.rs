//! Account-level operations. Pure composition over the user repository;
//! errors pass through unchanged.

use sqlx::SqlitePool;

use crate::auth::repo_types::User;
use crate::error::ServiceError;

pub async fn register(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, ServiceError> {
    User::create(db, username, password).await
}

pub async fn login(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, ServiceError> {
    User::authenticate(db, username, password).await
}

pub async fn delete_account(db: &SqlitePool, username: &str) -> Result<(), ServiceError> {
    User::delete(db, username).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::history;

    #[tokio::test]
    async fn register_then_login() {
        let db = test_pool().await;
        register(&db, "alice", "hunter2").await.expect("register");
        let user = login(&db, "alice", "hunter2").await.expect("login");
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn deleted_account_cannot_login() {
        let db = test_pool().await;
        register(&db, "alice", "hunter2").await.expect("register");
        history::repo::add(&db, "alice", "Paris").await.expect("add");

        delete_account(&db, "alice").await.expect("delete");

        let err = login(&db, "alice", "hunter2").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));

        let err = User::find_by_username(&db, "alice").await.unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound));
    }
}
