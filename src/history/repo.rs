use sqlx::SqlitePool;

use crate::auth::repo_types::User;
use crate::error::ServiceError;

/// Append one search to the user's history. The city is free text; empty
/// strings and repeats are stored as-is.
pub async fn add(db: &SqlitePool, username: &str, city: &str) -> Result<(), ServiceError> {
    let user = User::find_by_username(db, username).await?;
    sqlx::query("INSERT INTO history (user_id, city) VALUES (?, ?)")
        .bind(user.id)
        .bind(city)
        .execute(db)
        .await?;
    Ok(())
}

/// All recorded cities for the user, most recent first.
pub async fn list(db: &SqlitePool, username: &str) -> Result<Vec<String>, ServiceError> {
    let user = User::find_by_username(db, username).await?;
    let cities = sqlx::query_scalar::<_, String>(
        r#"
        SELECT city
        FROM history
        WHERE user_id = ?
        ORDER BY id DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(db)
    .await?;
    Ok(cities)
}

/// The `limit` most frequently recorded cities, highest count first.
/// Tie order between equal counts is unspecified.
pub async fn top(db: &SqlitePool, username: &str, limit: i64) -> Result<Vec<String>, ServiceError> {
    let user = User::find_by_username(db, username).await?;
    // A negative LIMIT means "unbounded" to sqlite, so clamp here.
    if limit <= 0 {
        return Ok(Vec::new());
    }
    let cities = sqlx::query_scalar::<_, String>(
        r#"
        SELECT city
        FROM history
        WHERE user_id = ?
        GROUP BY city
        ORDER BY COUNT(*) DESC
        LIMIT ?
        "#,
    )
    .bind(user.id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(cities)
}

/// Drop every history row for the user. A user with no history is a no-op.
pub async fn clear(db: &SqlitePool, username: &str) -> Result<(), ServiceError> {
    let user = User::find_by_username(db, username).await?;
    sqlx::query("DELETE FROM history WHERE user_id = ?")
        .bind(user.id)
        .execute(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn with_user(db: &SqlitePool, username: &str) {
        User::create(db, username, "pw").await.expect("create user");
    }

    #[tokio::test]
    async fn list_returns_most_recent_first() {
        let db = test_pool().await;
        with_user(&db, "alice").await;

        add(&db, "alice", "Paris").await.expect("add Paris");
        add(&db, "alice", "Rome").await.expect("add Rome");

        let cities = list(&db, "alice").await.expect("list");
        assert_eq!(cities, vec!["Rome".to_string(), "Paris".to_string()]);
    }

    #[tokio::test]
    async fn list_is_empty_for_fresh_user() {
        let db = test_pool().await;
        with_user(&db, "alice").await;
        let cities = list(&db, "alice").await.expect("list");
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn add_does_not_deduplicate_or_validate() {
        let db = test_pool().await;
        with_user(&db, "alice").await;

        add(&db, "alice", "Paris").await.expect("add");
        add(&db, "alice", "Paris").await.expect("add repeat");
        add(&db, "alice", "").await.expect("add empty");

        let cities = list(&db, "alice").await.expect("list");
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[0], "");
    }

    #[tokio::test]
    async fn add_for_missing_user_fails() {
        let db = test_pool().await;
        let err = add(&db, "ghost", "Paris").await.unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound));
    }

    #[tokio::test]
    async fn top_ranks_by_count() {
        let db = test_pool().await;
        with_user(&db, "alice").await;

        for _ in 0..3 {
            add(&db, "alice", "Paris").await.expect("add Paris");
        }
        add(&db, "alice", "Rome").await.expect("add Rome");

        let top_one = top(&db, "alice", 1).await.expect("top 1");
        assert_eq!(top_one, vec!["Paris".to_string()]);

        let top_five = top(&db, "alice", 5).await.expect("top 5");
        assert_eq!(top_five.len(), 2);
        assert_eq!(top_five[0], "Paris");
    }

    #[tokio::test]
    async fn top_with_zero_or_negative_limit_is_empty() {
        let db = test_pool().await;
        with_user(&db, "alice").await;
        add(&db, "alice", "Paris").await.expect("add");

        assert!(top(&db, "alice", 0).await.expect("top 0").is_empty());
        assert!(top(&db, "alice", -3).await.expect("top -3").is_empty());
    }

    #[tokio::test]
    async fn history_is_scoped_per_user() {
        let db = test_pool().await;
        with_user(&db, "alice").await;
        with_user(&db, "bob").await;

        add(&db, "alice", "Paris").await.expect("add");

        assert!(list(&db, "bob").await.expect("list bob").is_empty());
        assert!(top(&db, "bob", 5).await.expect("top bob").is_empty());
    }

    #[tokio::test]
    async fn clear_empties_history_and_is_idempotent() {
        let db = test_pool().await;
        with_user(&db, "alice").await;
        add(&db, "alice", "Paris").await.expect("add");

        clear(&db, "alice").await.expect("clear");
        assert!(list(&db, "alice").await.expect("list").is_empty());

        clear(&db, "alice").await.expect("clear again");
    }
}
