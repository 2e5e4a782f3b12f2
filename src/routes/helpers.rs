use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{
        admin::AuthenticatedAdmin,
        helper::{Helper, HelperCreateRequest, HelperUpdateRequest},
    },
    routes::{detail, internal_error, total_pages, PageQuery},
    AppState,
};

/// GET /api/admin/helpers: paginated, username substring search.
pub async fn list(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let pattern = query.search_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM helper WHERE instagram_username ILIKE $1")
            .bind(&pattern)
            .fetch_one(&state.db)
            .await
            .map_err(internal_error)?;

    let helpers = sqlx::query_as::<_, Helper>(
        "SELECT * FROM helper WHERE instagram_username ILIKE $1
         ORDER BY id LIMIT $2 OFFSET $3",
    )
    .bind(&pattern)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(&state.db)
    .await
    .map_err(internal_error)?;

    Ok(Json(json!({
        "helpers": helpers,
        "total": total,
        "total_pages": total_pages(total, query.limit()),
        "current_page": query.page(),
    })))
}

/// POST /api/admin/helpers: register a bot account. The Instagram
/// session itself is established later by the worker.
pub async fn create(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<HelperCreateRequest>,
) -> Result<(StatusCode, Json<Helper>), (StatusCode, Json<Value>)> {
    let existing =
        sqlx::query_scalar::<_, i64>("SELECT id FROM helper WHERE instagram_username = $1")
            .bind(&body.instagram_username)
            .fetch_optional(&state.db)
            .await
            .map_err(internal_error)?;

    if existing.is_some() {
        return Err(detail(StatusCode::BAD_REQUEST, "Helper already exists"));
    }

    let encrypted_password = state
        .cipher
        .encrypt(&body.instagram_password)
        .map_err(internal_error)?;
    let encrypted_totp = body
        .totp_secret
        .as_deref()
        .map(|s| state.cipher.encrypt(s))
        .transpose()
        .map_err(internal_error)?;

    let helper = sqlx::query_as::<_, Helper>(
        "INSERT INTO helper (instagram_username, instagram_password, totp_secret, is_active)
         VALUES ($1, $2, $3, TRUE) RETURNING *",
    )
    .bind(&body.instagram_username)
    .bind(&encrypted_password)
    .bind(&encrypted_totp)
    .fetch_one(&state.db)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(helper)))
}

/// PUT /api/admin/helpers/{id}: activation toggle.
pub async fn update(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<i64>,
    Json(body): Json<HelperUpdateRequest>,
) -> Result<Json<Helper>, (StatusCode, Json<Value>)> {
    let helper = sqlx::query_as::<_, Helper>(
        "UPDATE helper SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(body.is_active)
    .fetch_optional(&state.db)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Helper not found"))?;

    Ok(Json(helper))
}

/// DELETE /api/admin/helpers/{id}
pub async fn delete(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let result = sqlx::query("DELETE FROM helper WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(detail(StatusCode::NOT_FOUND, "Helper not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
