use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autogram_api::config::Config;
use autogram_api::db;
use autogram_api::middleware::auth::JwtSecret;
use autogram_api::routes;
use autogram_api::services::crypto::CredentialCipher;
use autogram_api::services::instagram::InstagramWorker;
use autogram_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let cipher = Arc::new(CredentialCipher::new(&config.encryption_key)?);

    let instagram = Arc::new(InstagramWorker::new(config.instagram_worker_url.clone()));
    if instagram.base_url.is_some() {
        info!("Instagram worker gateway configured");
    } else {
        info!("Instagram worker not configured, unfollow checker disabled");
    }

    let state = AppState {
        db: pool,
        config: config.clone(),
        cipher,
        instagram,
    };

    let cors_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(AllowOrigin::list(cors_origins));

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/api/health", get(routes::health::health_check))
        // Public
        .route("/api/announcements", get(routes::announcements::list_active))
        .route("/api/request-by-week", get(routes::requests::list_requests_by_week))
        .route("/api/user-action-verification", get(routes::requests::list_user_action_verifications))
        .route("/api/consumer", post(routes::consumers::register))
        .route("/api/consumer/{username}", get(routes::consumers::get).delete(routes::consumers::delete))
        .route("/api/producer", post(routes::producers::register))
        .route("/api/producer/{username}", get(routes::producers::get).delete(routes::producers::delete))
        .route("/api/unfollow-checker", post(routes::unfollowers::check))
        .route("/api/unfollower-service/register", post(routes::unfollowers::register_service_user))
        .route("/api/unfollower-service/{username}", delete(routes::unfollowers::delete_service_user))
        .route("/api/unfollowers/{owner}", get(routes::unfollowers::list_for_owner))
        // Admin
        .route("/api/admin/login", post(routes::admin_auth::login))
        .route("/api/admin/me", get(routes::admin_auth::me))
        .route("/api/admin/sns-users", get(routes::sns_users::list).post(routes::sns_users::create))
        .route("/api/admin/sns-users/{id}", put(routes::sns_users::update).delete(routes::sns_users::delete))
        .route("/api/admin/helpers", get(routes::helpers::list).post(routes::helpers::create))
        .route("/api/admin/helpers/{id}", put(routes::helpers::update).delete(routes::helpers::delete))
        .route("/api/admin/announcements", get(routes::announcements::list_all).post(routes::announcements::create))
        .route("/api/admin/announcements/{id}", put(routes::announcements::update).delete(routes::announcements::delete))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Autogram API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
