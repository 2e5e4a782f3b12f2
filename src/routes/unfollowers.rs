use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::unfollower::{
        UnfollowCheckRequest, UnfollowCheckResult, Unfollower, UnfollowerServiceRegisterRequest,
        UnfollowerServiceRegisterResponse,
    },
    routes::detail,
    AppState,
};

/// POST /api/unfollow-checker: live check through the Instagram worker.
/// Nothing is stored; the result is computed and returned as-is.
pub async fn check(
    State(state): State<AppState>,
    Json(body): Json<UnfollowCheckRequest>,
) -> Result<Json<UnfollowCheckResult>, (StatusCode, Json<Value>)> {
    let snapshot = state
        .instagram
        .fetch_follow_snapshot(
            &body.instagram_username,
            &body.instagram_password,
            body.verification_code.as_deref(),
        )
        .await
        .map_err(|e| {
            detail(
                StatusCode::BAD_REQUEST,
                format!("언팔로워 조회에 실패했습니다: {e}"),
            )
        })?;

    Ok(Json(snapshot.into_check_result()))
}

/// POST /api/unfollower-service/register: opt in to the scheduled
/// unfollower tracking. Requires an existing 품앗이 registration.
pub async fn register_service_user(
    State(state): State<AppState>,
    Json(body): Json<UnfollowerServiceRegisterRequest>,
) -> Result<(StatusCode, Json<UnfollowerServiceRegisterResponse>), (StatusCode, Json<Value>)> {
    let already = sqlx::query_scalar::<_, String>(
        "SELECT username FROM unfollower_service_user WHERE username = $1",
    )
    .bind(&body.username)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    if already.is_some() {
        return Err(detail(StatusCode::BAD_REQUEST, "이미 등록된 사용자입니다."));
    }

    let sns_user =
        sqlx::query_scalar::<_, i64>("SELECT id FROM sns_raise_user WHERE username = $1")
            .bind(&body.username)
            .fetch_optional(&state.db)
            .await
            .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    if sns_user.is_none() {
        return Err(detail(
            StatusCode::NOT_FOUND,
            "SNS 품앗이 사용자로 먼저 등록해주세요.",
        ));
    }

    let encrypted_password = state
        .cipher
        .encrypt(&body.password)
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;
    let encrypted_totp = body
        .totp_secret
        .as_deref()
        .map(|s| state.cipher.encrypt(s))
        .transpose()
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    sqlx::query(
        "INSERT INTO unfollower_service_user (username, password, totp_secret) VALUES ($1, $2, $3)",
    )
    .bind(&body.username)
    .bind(&encrypted_password)
    .bind(&encrypted_totp)
    .execute(&state.db)
    .await
    .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("등록에 실패했습니다: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(UnfollowerServiceRegisterResponse {
            username: body.username,
            message: "언팔로워 검색 서비스에 성공적으로 등록되었습니다.".to_string(),
        }),
    ))
}

/// GET /api/unfollowers/{owner}: latest stored unfollower list.
pub async fn list_for_owner(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let registered = sqlx::query_scalar::<_, String>(
        "SELECT username FROM unfollower_service_user WHERE username = $1",
    )
    .bind(&owner)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        detail(
            StatusCode::BAD_REQUEST,
            format!("언팔로워 조회에 실패했습니다: {e}"),
        )
    })?;

    if registered.is_none() {
        return Err(detail(
            StatusCode::NOT_FOUND,
            "언팔로워 서비스에 등록되지 않은 사용자입니다.",
        ));
    }

    let unfollowers = sqlx::query_as::<_, Unfollower>(
        "SELECT * FROM unfollowers WHERE owner = $1 ORDER BY unfollower_username",
    )
    .bind(&owner)
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        detail(
            StatusCode::BAD_REQUEST,
            format!("언팔로워 조회에 실패했습니다: {e}"),
        )
    })?;

    Ok(Json(json!({
        "owner": owner,
        "count": unfollowers.len(),
        "unfollowers": unfollowers,
    })))
}

/// DELETE /api/unfollower-service/{username}: drop the registration and
/// all stored unfollower rows for the account.
pub async fn delete_service_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let registered = sqlx::query_scalar::<_, String>(
        "SELECT username FROM unfollower_service_user WHERE username = $1",
    )
    .bind(&username)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("계정 삭제에 실패했습니다: {e}")))?;

    if registered.is_none() {
        return Err(detail(
            StatusCode::NOT_FOUND,
            "언팔로워 서비스에 등록되지 않은 사용자입니다.",
        ));
    }

    let mut tx = state
        .db
        .begin()
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("계정 삭제에 실패했습니다: {e}")))?;

    let deleted = sqlx::query("DELETE FROM unfollowers WHERE owner = $1")
        .bind(&username)
        .execute(&mut *tx)
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("계정 삭제에 실패했습니다: {e}")))?
        .rows_affected();

    sqlx::query("DELETE FROM unfollower_service_user WHERE username = $1")
        .bind(&username)
        .execute(&mut *tx)
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("계정 삭제에 실패했습니다: {e}")))?;

    tx.commit()
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("계정 삭제에 실패했습니다: {e}")))?;

    Ok(Json(json!({
        "message": format!("계정이 성공적으로 삭제되었습니다. (언팔로워 {deleted}명 삭제됨)"),
        "deleted_unfollowers_count": deleted,
    })))
}
