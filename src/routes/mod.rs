pub mod admin_auth;
pub mod announcements;
pub mod consumers;
pub mod health;
pub mod helpers;
pub mod producers;
pub mod requests;
pub mod sns_users;
pub mod unfollowers;

use axum::{http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

/// Standard error envelope: every failure body is `{ "detail": ... }`.
pub(crate) fn detail(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message.into() })))
}

pub(crate) fn internal_error<E: std::fmt::Display>(e: E) -> (StatusCode, Json<Value>) {
    detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Query parameters shared by the public list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub username: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).clamp(1, 1000)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Query parameters shared by the admin list endpoints (1-indexed pages).
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// ILIKE pattern matching the search term anywhere in the column.
    /// Backslash goes first so user input cannot un-escape a wildcard.
    pub fn search_pattern(&self) -> String {
        let term = self.search.as_deref().unwrap_or("").trim();
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    }
}

pub(crate) fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults_and_clamps() {
        let q = ListQuery { username: None, limit: None, offset: None };
        assert_eq!(q.limit(), 100);
        assert_eq!(q.offset(), 0);

        let q = ListQuery { username: None, limit: Some(9999), offset: Some(-5) };
        assert_eq!(q.limit(), 1000);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_query_offset() {
        let q = PageQuery { page: Some(3), limit: Some(20), search: None };
        assert_eq!(q.offset(), 40);

        let q = PageQuery { page: Some(0), limit: None, search: None };
        assert_eq!(q.page(), 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let q = PageQuery { page: None, limit: None, search: Some("50%_off".into()) };
        assert_eq!(q.search_pattern(), "%50\\%\\_off%");
    }

    #[test]
    fn test_search_pattern_escapes_backslash() {
        let q = PageQuery { page: None, limit: None, search: Some("back\\slash".into()) };
        assert_eq!(q.search_pattern(), "%back\\\\slash%");

        // A trailing backslash must not swallow the closing wildcard
        let q = PageQuery { page: None, limit: None, search: Some("kim\\".into()) };
        assert_eq!(q.search_pattern(), "%kim\\\\%");
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
    }
}
