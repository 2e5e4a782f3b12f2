use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    /// Markdown body rendered by the front end.
    pub content: String,
    pub kakao_openchat_link: Option<String>,
    pub kakao_qr_code_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub kakao_openchat_link: Option<String>,
    pub kakao_qr_code_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// All fields optional; unset fields keep their current value.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub kakao_openchat_link: Option<String>,
    pub kakao_qr_code_url: Option<String>,
    pub is_active: Option<bool>,
}
