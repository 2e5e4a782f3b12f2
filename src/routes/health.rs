use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET /api/health: liveness plus a database round trip. The admin
/// table always exists once migrations ran, so counting it proves both
/// connectivity and schema.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin")
        .fetch_one(&state.db)
        .await;

    match db {
        Ok(_) => (StatusCode::OK, Json(status_body(None))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(status_body(Some(&e.to_string()))),
        ),
    }
}

fn status_body(db_error: Option<&str>) -> Value {
    match db_error {
        None => json!({
            "status": "ok",
            "service": "autogram-api",
            "version": env!("CARGO_PKG_VERSION"),
        }),
        Some(e) => json!({
            "status": "degraded",
            "service": "autogram-api",
            "version": env!("CARGO_PKG_VERSION"),
            "database": e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_body_names_the_service() {
        let body = status_body(None);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "autogram-api");
        assert!(body["version"].is_string());
        assert!(body.get("database").is_none());
    }

    #[test]
    fn test_degraded_body_carries_the_db_error() {
        let body = status_body(Some("connection refused"));
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], "connection refused");
    }
}
