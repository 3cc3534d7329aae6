use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Medicine, Prescription};

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    image_url: &str,
    deletion_handle: Option<&str>,
    doctor_name: &str,
    hospital_name: &str,
    prescription_date: DateTime<Utc>,
    notes: &str,
    medicines: Vec<Medicine>,
) -> Result<Prescription, sqlx::Error> {
    sqlx::query_as::<_, Prescription>(
        "INSERT INTO prescriptions (user_id, image_url, deletion_handle, doctor_name,
                                    hospital_name, prescription_date, notes, medicines)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(user_id)
    .bind(image_url)
    .bind(deletion_handle)
    .bind(doctor_name)
    .bind(hospital_name)
    .bind(prescription_date)
    .bind(notes)
    .bind(Json(medicines))
    .fetch_one(pool)
    .await
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Prescription>, sqlx::Error> {
    sqlx::query_as::<_, Prescription>(
        "SELECT * FROM prescriptions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Delete a prescription only if it is owned by the given user. Returns
/// the deleted row, or None when absent or not owned — callers cannot
/// tell the two apart.
pub async fn delete_owned(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Prescription>, sqlx::Error> {
    sqlx::query_as::<_, Prescription>(
        "DELETE FROM prescriptions WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prescriptions")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn count_since(pool: &PgPool, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prescriptions WHERE created_at >= $1")
        .bind(since)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
