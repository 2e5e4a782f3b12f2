use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// SNS 품앗이 participant; the account registered for the weekly
/// comment-exchange rounds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SnsRaiseUser {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One shared Instagram link for a weekly exchange round.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestByWeek {
    pub id: i64,
    pub username: String,
    pub instagram_link: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub status: String,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Tracks whether a participant commented on another member's link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserActionVerification {
    pub id: i64,
    pub username: String,
    pub instagram_link: String,
    pub link_owner_username: String,
    pub has_commented: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SnsUserCreateRequest {
    pub username: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SnsUserUpdateRequest {
    pub username: String,
}
