use std::collections::HashSet;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::models::unfollower::UnfollowCheckResult;

/// Follow sets fetched for one Instagram account.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowSnapshot {
    pub following: Vec<String>,
    pub followers: Vec<String>,
}

/// Gateway to the external Instagram worker; the service that owns all
/// scraping and bot sessions. This API never talks to Instagram itself.
pub struct InstagramWorker {
    pub client: Client,
    pub base_url: Option<String>,
}

impl InstagramWorker {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch the current following/followers lists for an account by
    /// delegating the login to the worker.
    pub async fn fetch_follow_snapshot(
        &self,
        username: &str,
        password: &str,
        verification_code: Option<&str>,
    ) -> anyhow::Result<FollowSnapshot> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Instagram worker not configured"))?;

        let res = self
            .client
            .post(format!("{base_url}/follow-snapshot"))
            .json(&json!({
                "username": username,
                "password": password,
                "verification_code": verification_code,
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            anyhow::bail!("Instagram worker returned {}", res.status());
        }

        Ok(res.json::<FollowSnapshot>().await?)
    }
}

/// Accounts in `following` that are missing from `followers`, in the
/// order they appear in `following`.
pub fn not_following_back(snapshot: &FollowSnapshot) -> Vec<String> {
    let followers: HashSet<&str> = snapshot.followers.iter().map(String::as_str).collect();
    snapshot
        .following
        .iter()
        .filter(|u| !followers.contains(u.as_str()))
        .cloned()
        .collect()
}

impl FollowSnapshot {
    pub fn into_check_result(self) -> UnfollowCheckResult {
        let not_following_back = not_following_back(&self);
        UnfollowCheckResult {
            total_following: self.following.len(),
            total_followers: self.followers.len(),
            total_unfollowers: not_following_back.len(),
            following: self.following,
            followers: self.followers,
            not_following_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(following: &[&str], followers: &[&str]) -> FollowSnapshot {
        FollowSnapshot {
            following: following.iter().map(|s| s.to_string()).collect(),
            followers: followers.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_not_following_back_keeps_following_order() {
        let snap = snapshot(&["a", "b", "c", "d"], &["b", "d", "e"]);
        assert_eq!(not_following_back(&snap), vec!["a", "c"]);
    }

    #[test]
    fn test_everyone_follows_back() {
        let snap = snapshot(&["a", "b"], &["b", "a", "c"]);
        assert!(not_following_back(&snap).is_empty());
    }

    #[test]
    fn test_check_result_totals() {
        let result = snapshot(&["a", "b", "c"], &["a"]).into_check_result();
        assert_eq!(result.total_following, 3);
        assert_eq!(result.total_followers, 1);
        assert_eq!(result.total_unfollowers, 2);
        assert_eq!(result.not_following_back, vec!["b", "c"]);
    }
}
