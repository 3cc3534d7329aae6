use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::AuthAdmin;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::{Admin, Prescription, TestResult, User};
use crate::state::SharedState;
use crate::storage::purge_best_effort;

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: Admin,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PatientQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct PatientEntry {
    #[serde(flatten)]
    pub user: User,
    pub prescriptions: Vec<Prescription>,
    pub tests: Vec<TestResult>,
    pub total_records: usize,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateAdminProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let admin = db::admins::find_by_email(&state.pool, &req.email)
        .await?
        .filter(|a| a.is_active)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &admin.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    db::admins::touch_last_login(&state.pool, admin.id).await?;

    let token =
        encode_token(&Claims::admin(admin.id), &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(AdminLoginResponse { token, admin }))
}

pub async fn list_patients(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    // page comes from the query string; saturate rather than overflow.
    let offset = (page - 1).saturating_mul(limit);
    let search = query.search.as_deref().filter(|s| !s.is_empty());

    let users = db::users::search_page(&state.pool, search, limit, offset).await?;
    let total = db::users::count_search(&state.pool, search).await?;

    let mut patients = Vec::with_capacity(users.len());
    for user in users {
        let prescriptions = db::prescriptions::list_by_user(&state.pool, user.id).await?;
        let tests = db::test_results::list_by_user(&state.pool, user.id).await?;
        let total_records = prescriptions.len() + tests.len();
        patients.push(PatientEntry {
            user,
            prescriptions,
            tests,
            total_records,
        });
    }

    let total_pages = (total + limit - 1) / limit;

    Ok(Json(json!({
        "patients": patients,
        "pagination": {
            "current_page": page,
            "total_pages": total_pages,
            "total_patients": total,
            "has_next": page.saturating_mul(limit) < total,
            "has_prev": page > 1,
        }
    })))
}

pub async fn get_patient(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    let prescriptions = db::prescriptions::list_by_user(&state.pool, id).await?;
    let tests = db::test_results::list_by_user(&state.pool, id).await?;
    let total_records = prescriptions.len() + tests.len();

    Ok(Json(json!({
        "patient": PatientEntry { user, prescriptions, tests, total_records }
    })))
}

/// Full removal of a patient: records cascade in the database, then any
/// stored assets are purged best-effort.
pub async fn delete_patient(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let prescriptions = db::prescriptions::list_by_user(&state.pool, id).await?;
    let tests = db::test_results::list_by_user(&state.pool, id).await?;

    let deleted = db::users::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Patient not found".to_string()));
    }

    for p in &prescriptions {
        purge_best_effort(state.storage.as_ref(), p.deletion_handle.as_deref()).await;
    }
    for t in &tests {
        purge_best_effort(state.storage.as_ref(), t.deletion_handle.as_deref()).await;
    }

    tracing::info!("Admin {} deleted patient {id}", auth.admin.id);

    Ok(Json(json!({ "message": "Patient record deleted successfully" })))
}

pub async fn stats(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let total_patients = db::users::count_all(&state.pool).await?;
    let total_prescriptions = db::prescriptions::count_all(&state.pool).await?;
    let total_tests = db::test_results::count_all(&state.pool).await?;

    let thirty_days_ago = Utc::now() - Duration::days(30);
    let recent_patients = db::users::count_since(&state.pool, thirty_days_ago).await?;
    let recent_prescriptions =
        db::prescriptions::count_since(&state.pool, thirty_days_ago).await?;
    let recent_tests = db::test_results::count_since(&state.pool, thirty_days_ago).await?;

    let monthly: Vec<serde_json::Value> = db::users::monthly_signups(&state.pool, 12)
        .await?
        .into_iter()
        .map(|(month, count)| json!({ "month": month, "count": count }))
        .collect();

    Ok(Json(json!({
        "stats": {
            "total_patients": total_patients,
            "total_prescriptions": total_prescriptions,
            "total_tests": total_tests,
            "recent_patients": recent_patients,
            "recent_prescriptions": recent_prescriptions,
            "recent_tests": recent_tests,
            "recent_activities": recent_prescriptions + recent_tests,
            "monthly_signups": monthly,
        }
    })))
}

pub async fn update_profile(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(req): Json<UpdateAdminProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(ref new_password) = req.new_password {
        let current = req.current_password.as_deref().ok_or_else(|| {
            AppError::BadRequest("Current password is required to set a new password".to_string())
        })?;

        let valid =
            password::verify(current, &auth.admin.password_hash).map_err(AppError::Internal)?;
        if !valid {
            return Err(AppError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        if new_password.len() < 8 {
            return Err(AppError::BadRequest(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let pw_hash = password::hash(new_password).map_err(AppError::Internal)?;
        db::admins::update_password(&state.pool, auth.admin.id, &pw_hash).await?;
    }

    let admin = db::admins::update_profile(
        &state.pool,
        auth.admin.id,
        req.name.as_deref(),
        req.email.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::BadRequest("Email already in use".to_string())
        }
        _ => AppError::Database(e),
    })?
    .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "admin": admin,
    })))
}
