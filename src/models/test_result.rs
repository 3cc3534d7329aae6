use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct TestResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub url: String,
    #[serde(skip_serializing)]
    pub deletion_handle: Option<String>,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}
