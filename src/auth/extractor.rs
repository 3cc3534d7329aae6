use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt::{self, ROLE_ADMIN, ROLE_USER};
use crate::db;
use crate::error::AppError;
use crate::models::Admin;
use crate::state::SharedState;

/// An authenticated patient, extracted from the bearer token.
///
/// A missing Authorization header and a bad token both map to 401 but
/// carry distinguishable messages for client diagnostics.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .ok_or_else(|| AppError::Unauthorized("No token".to_string()))?;

    header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("No token".to_string()))
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = jwt::decode_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

        if claims.role != ROLE_USER {
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// An authenticated administrator. The role claim alone is not enough:
/// the admin row must still exist and be active, so a deactivated
/// admin's still-valid token is rejected.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin: Admin,
}

impl FromRequestParts<SharedState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = jwt::decode_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

        if claims.role != ROLE_ADMIN {
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }

        let admin = db::admins::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(|| {
                AppError::Unauthorized("Invalid token or admin account deactivated".to_string())
            })?;

        Ok(AuthAdmin { admin })
    }
}
