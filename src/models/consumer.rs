use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registration status shared by consumer and producer accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Active,
    Inactive,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        };
        write!(f, "{s}")
    }
}

/// Instagram account registered to receive automated comments.
/// Status is stored as TEXT and fetched verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Consumer {
    pub instagram_username: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConsumerCreateRequest {
    pub instagram_username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_matches_stored_column_values() {
        assert_eq!(AccountStatus::Pending.to_string(), "pending");
        assert_eq!(AccountStatus::Active.to_string(), "active");
        assert_eq!(AccountStatus::Inactive.to_string(), "inactive");
    }
}
