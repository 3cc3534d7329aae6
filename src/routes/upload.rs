use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Medicine, Prescription, TestResult};
use crate::state::SharedState;
use crate::storage::purge_best_effort;
use crate::upload::{parse_multipart, UploadForm};

async fn parse_form(headers: &HeaderMap, body: Bytes) -> Result<UploadForm, AppError> {
    parse_multipart(headers, body)
        .await
        .map_err(AppError::BadRequest)
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates. Anything
/// else falls back to now, matching the record-store contract.
fn parse_prescription_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc();
        }
    }
    Utc::now()
}

pub async fn upload_prescription(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Prescription>, AppError> {
    let mut form = parse_form(&headers, body).await?;
    let file = form
        .file
        .take()
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let medicines: Vec<Medicine> = match form.field("medicines") {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| AppError::BadRequest("Invalid medicines list".to_string()))?,
        None => Vec::new(),
    };

    let asset = state
        .storage
        .store(file.bytes, &file.filename)
        .await
        .map_err(AppError::Internal)?;

    let prescription = db::prescriptions::create(
        &state.pool,
        auth.user_id,
        &asset.url,
        asset.deletion_handle.as_deref(),
        form.field("doctor_name").unwrap_or("Unknown"),
        form.field("hospital_name").unwrap_or("Unknown"),
        parse_prescription_date(form.field("prescription_date")),
        form.field("notes").unwrap_or(""),
        medicines,
    )
    .await?;

    Ok(Json(prescription))
}

pub async fn upload_test(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TestResult>, AppError> {
    let form = parse_form(&headers, body).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let filename = file.filename.clone();
    let asset = state
        .storage
        .store(file.bytes, &filename)
        .await
        .map_err(AppError::Internal)?;

    let test = db::test_results::create(
        &state.pool,
        auth.user_id,
        &asset.url,
        asset.deletion_handle.as_deref(),
        &filename,
    )
    .await?;

    Ok(Json(test))
}

pub async fn upload_avatar(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let form = parse_form(&headers, body).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let asset = state
        .storage
        .store(file.bytes, &file.filename)
        .await
        .map_err(AppError::Internal)?;

    let user = db::users::set_avatar(&state.pool, auth.user_id, &asset.url)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "avatar": user.avatar, "user": user })))
}

pub async fn delete_prescription(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::prescriptions::delete_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    purge_best_effort(state.storage.as_ref(), deleted.deletion_handle.as_deref()).await;

    Ok(Json(json!({ "message": "Deleted successfully" })))
}

pub async fn delete_test(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::test_results::delete_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    purge_best_effort(state.storage.as_ref(), deleted.deletion_handle.as_deref()).await;

    Ok(Json(json!({ "message": "Deleted successfully" })))
}
