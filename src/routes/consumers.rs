use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::consumer::{AccountStatus, Consumer, ConsumerCreateRequest},
    routes::detail,
    AppState,
};

/// POST /api/consumer: register to receive automated comments.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<ConsumerCreateRequest>,
) -> Result<(StatusCode, Json<Consumer>), (StatusCode, Json<Value>)> {
    let existing = sqlx::query_scalar::<_, String>(
        "SELECT instagram_username FROM consumer WHERE instagram_username = $1",
    )
    .bind(&body.instagram_username)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    if existing.is_some() {
        return Err(detail(StatusCode::BAD_REQUEST, "이미 등록된 사용자입니다."));
    }

    let consumer = sqlx::query_as::<_, Consumer>(
        "INSERT INTO consumer (instagram_username, status) VALUES ($1, $2) RETURNING *",
    )
    .bind(&body.instagram_username)
    .bind(AccountStatus::Pending.to_string())
    .fetch_one(&state.db)
    .await
    .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    Ok((StatusCode::CREATED, Json(consumer)))
}

/// GET /api/consumer/{username}
pub async fn get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Consumer>, (StatusCode, Json<Value>)> {
    let consumer =
        sqlx::query_as::<_, Consumer>("SELECT * FROM consumer WHERE instagram_username = $1")
            .bind(&username)
            .fetch_optional(&state.db)
            .await
            .map_err(|e| detail(StatusCode::BAD_REQUEST, e.to_string()))?
            .ok_or_else(|| detail(StatusCode::NOT_FOUND, "등록되지 않은 사용자입니다."))?;

    Ok(Json(consumer))
}

/// DELETE /api/consumer/{username}
pub async fn delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let result = sqlx::query("DELETE FROM consumer WHERE instagram_username = $1")
        .bind(&username)
        .execute(&state.db)
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("계정 삭제에 실패했습니다: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(detail(StatusCode::NOT_FOUND, "등록되지 않은 사용자입니다."));
    }

    Ok(Json(json!({ "message": "계정이 성공적으로 삭제되었습니다." })))
}
