use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub share_token: String,
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
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// The profile slice exposed on the unauthenticated QR view. No email,
/// no share token, no internal id.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub name: String,
    pub dob: String,
    pub phone: String,
    pub gender: String,
    pub emergency_contact: String,
    pub blood_group: String,
    pub height: String,
    pub weight: String,
    pub chronic_diseases: String,
    pub medicines: String,
    pub allergies: String,
    pub avatar: String,
}

impl From<User> for PublicProfile {
    fn from(u: User) -> Self {
        PublicProfile {
            name: u.name,
            dob: u.dob,
            phone: u.phone,
            gender: u.gender,
            emergency_contact: u.emergency_contact,
            blood_group: u.blood_group,
            height: u.height,
            weight: u.weight,
            chronic_diseases: u.chronic_diseases,
            medicines: u.medicines,
            allergies: u.allergies,
            avatar: u.avatar,
        }
    }
}
