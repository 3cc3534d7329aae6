use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ChatMessage, ChatSession};

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    messages: Vec<ChatMessage>,
) -> Result<ChatSession, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        "INSERT INTO chat_sessions (user_id, title, messages)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(user_id)
    .bind(title)
    .bind(Json(messages))
    .fetch_one(pool)
    .await
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatSession>, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        "SELECT * FROM chat_sessions WHERE user_id = $1 ORDER BY last_updated DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_owned(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<ChatSession>, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>("SELECT * FROM chat_sessions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_messages(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    messages: Vec<ChatMessage>,
) -> Result<Option<ChatSession>, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        "UPDATE chat_sessions SET messages = $3, last_updated = now()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(Json(messages))
    .fetch_optional(pool)
    .await
}

pub async fn delete_owned(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chat_sessions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
