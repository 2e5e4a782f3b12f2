use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};

use crate::models::admin::{AuthenticatedAdmin, Claims};

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Invalid authentication credentials" })),
    )
}

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let secret = parts.extensions.get::<JwtSecret>().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "JWT secret not configured" })),
        ))?;

        decode_access_token(token, &secret.0).map_err(|_| unauthorized())
    }
}

/// Extension type to carry the JWT secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

pub fn decode_access_token(token: &str, secret: &str) -> Result<AuthenticatedAdmin, anyhow::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation)?;

    Ok(AuthenticatedAdmin {
        username: data.claims.sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::AdminAuthService;

    #[test]
    fn test_issued_token_round_trips() {
        let token = AdminAuthService::create_access_token("staff", "test-secret", 30).unwrap();
        let admin = decode_access_token(&token, "test-secret").unwrap();
        assert_eq!(admin.username, "staff");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = AdminAuthService::create_access_token("staff", "test-secret", 30).unwrap();
        assert!(decode_access_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_access_token("not.a.jwt", "test-secret").is_err());
    }
}
