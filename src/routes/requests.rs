use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    models::sns_user::{RequestByWeek, UserActionVerification},
    routes::{internal_error, ListQuery},
    AppState,
};

/// GET /api/request-by-week: weekly link submissions, optional exact
/// username filter, newest week first.
pub async fn list_requests_by_week(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<RequestByWeek>>, (StatusCode, Json<Value>)> {
    let requests = sqlx::query_as::<_, RequestByWeek>(
        "SELECT * FROM request_by_week
         WHERE ($1::TEXT IS NULL OR username = $1)
         ORDER BY week_start_date DESC, id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(&query.username)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(&state.db)
    .await
    .map_err(internal_error)?;

    Ok(Json(requests))
}

/// GET /api/user-action-verification: comment verification records,
/// optional exact username filter.
pub async fn list_user_action_verifications(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UserActionVerification>>, (StatusCode, Json<Value>)> {
    let verifications = sqlx::query_as::<_, UserActionVerification>(
        "SELECT * FROM user_action_verification
         WHERE ($1::TEXT IS NULL OR username = $1)
         ORDER BY created_at DESC, id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(&query.username)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(&state.db)
    .await
    .map_err(internal_error)?;

    Ok(Json(verifications))
}
