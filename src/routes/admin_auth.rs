use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::{
    models::admin::{Admin, AdminLoginRequest, AuthenticatedAdmin, TokenResponse},
    routes::{detail, internal_error},
    services::auth::AdminAuthService,
    AppState,
};

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<Value>)> {
    let admin = AdminAuthService::authenticate(&state.db, &body.username, &body.password)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Incorrect username or password"))?;

    let access_token = AdminAuthService::create_access_token(
        &admin.username,
        &state.config.jwt_secret,
        state.config.access_token_expire_minutes,
    )
    .map_err(internal_error)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /api/admin/me: the admin behind the presented token.
pub async fn me(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
) -> Result<Json<Admin>, (StatusCode, Json<Value>)> {
    let row = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE username = $1")
        .bind(&admin.username)
        .fetch_optional(&state.db)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Admin not found"))?;

    Ok(Json(row))
}
