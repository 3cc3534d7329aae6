use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::TestResult;

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    url: &str,
    deletion_handle: Option<&str>,
    filename: &str,
) -> Result<TestResult, sqlx::Error> {
    sqlx::query_as::<_, TestResult>(
        "INSERT INTO test_results (user_id, url, deletion_handle, filename)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(user_id)
    .bind(url)
    .bind(deletion_handle)
    .bind(filename)
    .fetch_one(pool)
    .await
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<TestResult>, sqlx::Error> {
    sqlx::query_as::<_, TestResult>(
        "SELECT * FROM test_results WHERE user_id = $1 ORDER BY uploaded_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Owner-scoped delete; None means absent or not owned.
pub async fn delete_owned(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<TestResult>, sqlx::Error> {
    sqlx::query_as::<_, TestResult>(
        "DELETE FROM test_results WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test_results")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn count_since(pool: &PgPool, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test_results WHERE uploaded_at >= $1")
        .bind(since)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
