// Library exports for binary tools and tests
pub mod client;
pub mod config;
pub mod db;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use config::Config;
use services::crypto::CredentialCipher;
use services::instagram::InstagramWorker;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub cipher: Arc<CredentialCipher>,
    pub instagram: Arc<InstagramWorker>,
}
