use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Bot-operated Instagram account used internally to perform comment
/// actions. Credentials are encrypted at rest and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Helper {
    pub id: i64,
    pub instagram_username: String,
    #[serde(skip_serializing, default)]
    pub instagram_password: String,
    #[serde(skip_serializing, default)]
    pub totp_secret: Option<String>,
    pub is_active: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HelperCreateRequest {
    pub instagram_username: String,
    pub instagram_password: String,
    pub totp_secret: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HelperUpdateRequest {
    pub is_active: bool,
}
