use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{
        consumer::AccountStatus,
        producer::{Producer, ProducerCreateRequest},
    },
    routes::detail,
    AppState,
};

/// POST /api/producer: register an account for posting automated
/// comments. Credentials are encrypted before they are stored and are
/// never echoed back.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<ProducerCreateRequest>,
) -> Result<(StatusCode, Json<Producer>), (StatusCode, Json<Value>)> {
    let existing = sqlx::query_scalar::<_, String>(
        "SELECT instagram_username FROM producer WHERE instagram_username = $1",
    )
    .bind(&body.instagram_username)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    if existing.is_some() {
        return Err(detail(StatusCode::BAD_REQUEST, "이미 등록된 사용자입니다."));
    }

    let encrypted_password = state
        .cipher
        .encrypt(&body.instagram_password)
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;
    let encrypted_totp = body
        .totp_secret
        .as_deref()
        .map(|s| state.cipher.encrypt(s))
        .transpose()
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    let producer = sqlx::query_as::<_, Producer>(
        "INSERT INTO producer (instagram_username, instagram_password, totp_secret, status)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&body.instagram_username)
    .bind(&encrypted_password)
    .bind(&encrypted_totp)
    .bind(AccountStatus::Pending.to_string())
    .fetch_one(&state.db)
    .await
    .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    Ok((StatusCode::CREATED, Json(producer)))
}

/// GET /api/producer/{username}
pub async fn get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Producer>, (StatusCode, Json<Value>)> {
    let producer =
        sqlx::query_as::<_, Producer>("SELECT * FROM producer WHERE instagram_username = $1")
            .bind(&username)
            .fetch_optional(&state.db)
            .await
            .map_err(|e| detail(StatusCode::BAD_REQUEST, e.to_string()))?
            .ok_or_else(|| detail(StatusCode::NOT_FOUND, "등록되지 않은 사용자입니다."))?;

    Ok(Json(producer))
}

/// DELETE /api/producer/{username}
pub async fn delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let result = sqlx::query("DELETE FROM producer WHERE instagram_username = $1")
        .bind(&username)
        .execute(&state.db)
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("계정 삭제에 실패했습니다: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(detail(StatusCode::NOT_FOUND, "등록되지 않은 사용자입니다."));
    }

    Ok(Json(json!({ "message": "계정이 성공적으로 삭제되었습니다." })))
}
