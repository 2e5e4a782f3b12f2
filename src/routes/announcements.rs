use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{
        admin::AuthenticatedAdmin,
        announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    },
    routes::{detail, internal_error, total_pages, PageQuery},
    AppState,
};

/// GET /api/announcements: public, active announcements newest first.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, (StatusCode, Json<Value>)> {
    let announcements = sqlx::query_as::<_, Announcement>(
        "SELECT * FROM announcement WHERE is_active = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(internal_error)?;

    Ok(Json(announcements))
}

/// GET /api/admin/announcements: all announcements, paginated, title search.
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let pattern = query.search_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM announcement WHERE title ILIKE $1")
            .bind(&pattern)
            .fetch_one(&state.db)
            .await
            .map_err(internal_error)?;

    let announcements = sqlx::query_as::<_, Announcement>(
        "SELECT * FROM announcement WHERE title ILIKE $1
         ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(&pattern)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(&state.db)
    .await
    .map_err(internal_error)?;

    Ok(Json(json!({
        "announcements": announcements,
        "total": total,
        "total_pages": total_pages(total, query.limit()),
        "current_page": query.page(),
    })))
}

/// POST /api/admin/announcements
pub async fn create(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>), (StatusCode, Json<Value>)> {
    let announcement = sqlx::query_as::<_, Announcement>(
        "INSERT INTO announcement (title, content, kakao_openchat_link, kakao_qr_code_url, is_active)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&body.title)
    .bind(&body.content)
    .bind(&body.kakao_openchat_link)
    .bind(&body.kakao_qr_code_url)
    .bind(body.is_active)
    .fetch_one(&state.db)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// PUT /api/admin/announcements/{id}: partial update, unset fields keep
/// their current value.
pub async fn update(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<i64>,
    Json(body): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>, (StatusCode, Json<Value>)> {
    let announcement = sqlx::query_as::<_, Announcement>(
        "UPDATE announcement SET
            title = COALESCE($2, title),
            content = COALESCE($3, content),
            kakao_openchat_link = COALESCE($4, kakao_openchat_link),
            kakao_qr_code_url = COALESCE($5, kakao_qr_code_url),
            is_active = COALESCE($6, is_active),
            updated_at = NOW()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&body.title)
    .bind(&body.content)
    .bind(&body.kakao_openchat_link)
    .bind(&body.kakao_qr_code_url)
    .bind(body.is_active)
    .fetch_optional(&state.db)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Announcement not found"))?;

    Ok(Json(announcement))
}

/// DELETE /api/admin/announcements/{id}
pub async fn delete(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let result = sqlx::query("DELETE FROM announcement WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(detail(StatusCode::NOT_FOUND, "Announcement not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
