use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{
        admin::AuthenticatedAdmin,
        sns_user::{SnsRaiseUser, SnsUserCreateRequest, SnsUserUpdateRequest},
    },
    routes::{detail, internal_error, total_pages, PageQuery},
    AppState,
};

/// GET /api/admin/sns-users: paginated, username substring search.
pub async fn list(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let pattern = query.search_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sns_raise_user WHERE username ILIKE $1")
            .bind(&pattern)
            .fetch_one(&state.db)
            .await
            .map_err(internal_error)?;

    let users = sqlx::query_as::<_, SnsRaiseUser>(
        "SELECT * FROM sns_raise_user WHERE username ILIKE $1
         ORDER BY username LIMIT $2 OFFSET $3",
    )
    .bind(&pattern)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(&state.db)
    .await
    .map_err(internal_error)?;

    Ok(Json(json!({
        "users": users,
        "total": total,
        "total_pages": total_pages(total, query.limit()),
        "current_page": query.page(),
    })))
}

/// POST /api/admin/sns-users
pub async fn create(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<SnsUserCreateRequest>,
) -> Result<(StatusCode, Json<SnsRaiseUser>), (StatusCode, Json<Value>)> {
    let existing =
        sqlx::query_scalar::<_, i64>("SELECT id FROM sns_raise_user WHERE username = $1")
            .bind(&body.username)
            .fetch_optional(&state.db)
            .await
            .map_err(internal_error)?;

    if existing.is_some() {
        return Err(detail(StatusCode::BAD_REQUEST, "Username already exists"));
    }

    let user = sqlx::query_as::<_, SnsRaiseUser>(
        "INSERT INTO sns_raise_user (username) VALUES ($1) RETURNING *",
    )
    .bind(&body.username)
    .fetch_one(&state.db)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/admin/sns-users/{id}: rename a participant.
pub async fn update(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<i64>,
    Json(body): Json<SnsUserUpdateRequest>,
) -> Result<Json<SnsRaiseUser>, (StatusCode, Json<Value>)> {
    let taken_by =
        sqlx::query_scalar::<_, i64>("SELECT id FROM sns_raise_user WHERE username = $1")
            .bind(&body.username)
            .fetch_optional(&state.db)
            .await
            .map_err(internal_error)?;

    if taken_by.is_some_and(|other| other != id) {
        return Err(detail(StatusCode::BAD_REQUEST, "Username already exists"));
    }

    let user = sqlx::query_as::<_, SnsRaiseUser>(
        "UPDATE sns_raise_user SET username = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&body.username)
    .fetch_optional(&state.db)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found"))?;

    Ok(Json(user))
}

/// DELETE /api/admin/sns-users/{id}: cascades to requests,
/// verifications and unfollower-service rows.
pub async fn delete(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let result = sqlx::query("DELETE FROM sns_raise_user WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(detail(StatusCode::NOT_FOUND, "User not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
