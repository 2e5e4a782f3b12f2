use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Instagram account registered to post automated comments on others'
/// content. Credentials are encrypted at rest and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Producer {
    pub instagram_username: String,
    #[serde(skip_serializing, default)]
    pub instagram_password: String,
    #[serde(skip_serializing, default)]
    pub totp_secret: Option<String>,
    pub status: String,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProducerCreateRequest {
    pub instagram_username: String,
    pub instagram_password: String,
    pub totp_secret: Option<String>,
}
