use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

/// Free-text profile fields captured at signup. Anything the caller
/// leaves out is stored as an empty string.
#[derive(Debug, Default)]
pub struct ProfileFields {
    pub dob: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub emergency_contact: String,
    pub blood_group: String,
    pub height: String,
    pub weight: String,
    pub chronic_diseases: String,
    pub medicines: String,
    pub allergies: String,
}

/// Partial profile update: only provided fields are overwritten.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub blood_group: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub chronic_diseases: Option<String>,
    pub medicines: Option<String>,
    pub allergies: Option<String>,
}

pub async fn create(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    name: &str,
    share_token: &str,
    profile: &ProfileFields,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash, name, share_token, dob, phone, gender,
                            address, emergency_contact, blood_group, height, weight,
                            chronic_diseases, medicines, allergies)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
         RETURNING *",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(share_token)
    .bind(&profile.dob)
    .bind(&profile.phone)
    .bind(&profile.gender)
    .bind(&profile.address)
    .bind(&profile.emergency_contact)
    .bind(&profile.blood_group)
    .bind(&profile.height)
    .bind(&profile.weight)
    .bind(&profile.chronic_diseases)
    .bind(&profile.medicines)
    .bind(&profile.allergies)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_share_token(
    pool: &PgPool,
    share_token: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE share_token = $1")
        .bind(share_token)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET
             name = COALESCE($2, name),
             dob = COALESCE($3, dob),
             phone = COALESCE($4, phone),
             gender = COALESCE($5, gender),
             address = COALESCE($6, address),
             emergency_contact = COALESCE($7, emergency_contact),
             blood_group = COALESCE($8, blood_group),
             height = COALESCE($9, height),
             weight = COALESCE($10, weight),
             chronic_diseases = COALESCE($11, chronic_diseases),
             medicines = COALESCE($12, medicines),
             allergies = COALESCE($13, allergies)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.dob)
    .bind(&update.phone)
    .bind(&update.gender)
    .bind(&update.address)
    .bind(&update.emergency_contact)
    .bind(&update.blood_group)
    .bind(&update.height)
    .bind(&update.weight)
    .bind(&update.chronic_diseases)
    .bind(&update.medicines)
    .bind(&update.allergies)
    .fetch_optional(pool)
    .await
}

pub async fn set_avatar(pool: &PgPool, id: Uuid, url: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("UPDATE users SET avatar = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(url)
        .fetch_optional(pool)
        .await
}

/// Case-insensitive name/email search with pagination, newest first.
pub async fn search_page(
    pool: &PgPool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = search.map(|s| format!("%{s}%"));
    sqlx::query_as::<_, User>(
        "SELECT * FROM users
         WHERE $1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_search(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
    let pattern = search.map(|s| format!("%{s}%"));
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users
         WHERE $1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1",
    )
    .bind(pattern)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn count_since(pool: &PgPool, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE created_at >= $1")
        .bind(since)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Signup counts grouped by month, most recent first.
pub async fn monthly_signups(
    pool: &PgPool,
    months: i64,
) -> Result<Vec<(DateTime<Utc>, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT date_trunc('month', created_at) AS month, COUNT(*)
         FROM users
         GROUP BY 1
         ORDER BY 1 DESC
         LIMIT $1",
    )
    .bind(months)
    .fetch_all(pool)
    .await
}

/// Owned prescriptions, test results and chat sessions go with the user
/// via ON DELETE CASCADE.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
