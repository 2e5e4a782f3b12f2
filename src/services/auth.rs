use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::PgPool;

use crate::models::admin::{Admin, Claims};

pub struct AdminAuthService;

impl AdminAuthService {
    /// Validate admin credentials against the stored bcrypt hash.
    /// Returns None for unknown usernames and bad passwords alike.
    pub async fn authenticate(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> anyhow::Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        let Some(admin) = admin else {
            return Ok(None);
        };

        match bcrypt::verify(password, &admin.password) {
            Ok(true) => Ok(Some(admin)),
            _ => Ok(None),
        }
    }

    pub fn create_access_token(
        username: &str,
        secret: &str,
        expire_minutes: u64,
    ) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + chrono::Duration::minutes(expire_minutes as i64)).timestamp() as usize,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn hash_password(password: &str) -> anyhow::Result<String> {
        Ok(bcrypt::hash(password, 12)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies() {
        let hash = AdminAuthService::hash_password("hunter2").unwrap();
        assert!(bcrypt::verify("hunter2", &hash).unwrap());
        assert!(!bcrypt::verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_token_is_three_segments() {
        let token = AdminAuthService::create_access_token("staff", "secret", 30).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }
}
