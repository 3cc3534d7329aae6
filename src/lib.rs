pub mod auth;
pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod storage;
pub mod upload;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::chat::ChatBackend;
use crate::config::{BootstrapAdmin, Config};
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};
use crate::storage::{AssetStore, CloudStore, LocalStore};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let storage: Arc<dyn AssetStore> = match &config.asset_host {
        Some(host) => {
            tracing::info!("Using remote asset host at {}", host.url);
            Arc::new(CloudStore::new(host))
        }
        None => {
            tracing::info!("Using local uploads at {}", config.upload_dir.display());
            Arc::new(
                LocalStore::new(config.upload_dir.clone())
                    .expect("Failed to prepare upload directory"),
            )
        }
    };

    let chat_backend = config.chat.as_ref().map(ChatBackend::new);
    if chat_backend.is_none() {
        tracing::warn!("Chat backend not configured; /api/chat/message will fail");
    }

    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
    };

    let upload_dir = config.upload_dir.clone();
    let max_upload_size = config.max_upload_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        storage,
        chat_backend,
        login_limiter: LoginRateLimiter::new(),
    });

    // Expired limiter windows would otherwise accumulate forever.
    let limiter_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(15 * 60));
        loop {
            interval.tick().await;
            limiter_state
                .login_limiter
                .cleanup(std::time::Duration::from_secs(30 * 60));
        }
    });

    Router::new()
        .merge(routes::api_routes())
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

/// Create the default admin account on first boot when configured.
pub async fn ensure_bootstrap_admin(
    pool: &PgPool,
    bootstrap: &BootstrapAdmin,
) -> Result<(), String> {
    let existing = db::admins::find_by_email(pool, &bootstrap.email)
        .await
        .map_err(|e| format!("Admin lookup failed: {e}"))?;

    if existing.is_some() {
        return Ok(());
    }

    let pw_hash = auth::password::hash(&bootstrap.password)?;
    let admin = db::admins::create(pool, &bootstrap.email, &pw_hash, &bootstrap.name)
        .await
        .map_err(|e| format!("Admin creation failed: {e}"))?;

    tracing::info!("Bootstrap admin created: {}", admin.email);
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
