use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account the owner follows that does not follow back. Rows are
/// maintained by the external unfollower batch; this API only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Unfollower {
    #[serde(skip_serializing, default)]
    pub owner: String,
    pub unfollower_username: String,
    pub unfollower_fullname: String,
    pub unfollower_profile_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UnfollowerServiceRegisterRequest {
    pub username: String,
    pub password: String,
    pub totp_secret: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnfollowerServiceRegisterResponse {
    pub username: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UnfollowCheckRequest {
    pub instagram_username: String,
    pub instagram_password: String,
    pub verification_code: Option<String>,
}

/// Result of a live unfollow check against the Instagram worker.
#[derive(Debug, Serialize, Deserialize)]
pub struct UnfollowCheckResult {
    pub following: Vec<String>,
    pub followers: Vec<String>,
    pub not_following_back: Vec<String>,
    pub total_following: usize,
    pub total_followers: usize,
    pub total_unfollowers: usize,
}
