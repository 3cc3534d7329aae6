use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: i64,
}

impl Claims {
    /// Session claims for a patient. Valid for 7 days.
    pub fn user(user_id: Uuid) -> Self {
        Self {
            sub: user_id,
            role: ROLE_USER.to_string(),
            exp: (Utc::now() + Duration::days(7)).timestamp(),
        }
    }

    /// Session claims for an administrator. Valid for 24 hours.
    pub fn admin(admin_id: Uuid) -> Self {
        Self {
            sub: admin_id,
            role: ROLE_ADMIN.to_string(),
            exp: (Utc::now() + Duration::hours(24)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}
