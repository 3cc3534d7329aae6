use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Prescription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_url: String,
    #[serde(skip_serializing)]
    pub deletion_handle: Option<String>,
    pub doctor_name: String,
    pub hospital_name: String,
    pub prescription_date: DateTime<Utc>,
    pub notes: String,
    pub medicines: Json<Vec<Medicine>>,
    pub created_at: DateTime<Utc>,
}
