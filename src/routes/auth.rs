use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::auth::share::generate_share_token;
use crate::db;
use crate::db::users::ProfileFields;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub chronic_diseases: Option<String>,
    #[serde(default)]
    pub medicines: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

pub async fn signup(
    State(state): State<SharedState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "name, email and password are required".to_string(),
        ));
    }

    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;
    let share_token = generate_share_token();

    let profile = ProfileFields {
        dob: req.dob.unwrap_or_default(),
        phone: req.phone.unwrap_or_default(),
        gender: req.gender.unwrap_or_default(),
        address: req.address.unwrap_or_default(),
        emergency_contact: req.emergency_contact.unwrap_or_default(),
        blood_group: req.blood_group.unwrap_or_default(),
        height: req.height.unwrap_or_default(),
        weight: req.weight.unwrap_or_default(),
        chronic_diseases: req.chronic_diseases.unwrap_or_default(),
        medicines: req.medicines.unwrap_or_default(),
        allergies: req.allergies.unwrap_or_default(),
    };

    let user = db::users::create(
        &state.pool,
        &req.email,
        &pw_hash,
        &req.name,
        &share_token,
        &profile,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::BadRequest("Email already registered".to_string())
        }
        _ => AppError::Database(e),
    })?;

    let token =
        encode_token(&Claims::user(user.id), &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!("New user registered: {}", user.id);

    Ok(Json(AuthResponse { token, user }))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token =
        encode_token(&Claims::user(user.id), &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(AuthResponse { token, user }))
}
