use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::users::ProfileUpdate;
use crate::error::AppError;
use crate::models::{Prescription, PublicProfile, TestResult, User};
use crate::state::SharedState;

#[derive(Serialize)]
pub struct RecordsResponse {
    pub user: User,
    pub prescriptions: Vec<Prescription>,
    pub tests: Vec<TestResult>,
}

#[derive(Serialize)]
pub struct PublicRecordsResponse {
    pub user: PublicProfile,
    pub prescriptions: Vec<Prescription>,
    pub tests: Vec<TestResult>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateProfileRequest {
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

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<RecordsResponse>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let prescriptions = db::prescriptions::list_by_user(&state.pool, auth.user_id).await?;
    let tests = db::test_results::list_by_user(&state.pool, auth.user_id).await?;

    Ok(Json(RecordsResponse {
        user,
        prescriptions,
        tests,
    }))
}

pub async fn update_me(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let update = ProfileUpdate {
        name: req.name,
        dob: req.dob,
        phone: req.phone,
        gender: req.gender,
        address: req.address,
        emergency_contact: req.emergency_contact,
        blood_group: req.blood_group,
        height: req.height,
        weight: req.weight,
        chronic_diseases: req.chronic_diseases,
        medicines: req.medicines,
        allergies: req.allergies,
    };

    let user = db::users::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": user })))
}

/// Share URL for the QR code. The frontend renders this as a scannable
/// code; whoever scans it lands on the public record view.
pub async fn qr(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let url = format!(
        "{}/medical-history/{}",
        state.config.public_url, user.share_token
    );

    Ok(Json(json!({ "url": url })))
}

/// Unauthenticated read-only view of a user's profile and records,
/// keyed by the opaque share token. The token is the only gate here:
/// possession of the QR link is the capability.
pub async fn public_record(
    State(state): State<SharedState>,
    Path(share_token): Path<String>,
) -> Result<Json<PublicRecordsResponse>, AppError> {
    let user = db::users::find_by_share_token(&state.pool, &share_token)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

    let prescriptions = db::prescriptions::list_by_user(&state.pool, user.id).await?;
    let tests = db::test_results::list_by_user(&state.pool, user.id).await?;

    Ok(Json(PublicRecordsResponse {
        user: user.into(),
        prescriptions,
        tests,
    }))
}
