use std::sync::Arc;

use sqlx::PgPool;

use crate::chat::ChatBackend;
use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;
use crate::storage::AssetStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub storage: Arc<dyn AssetStore>,
    pub chat_backend: Option<ChatBackend>,
    pub login_limiter: LoginRateLimiter,
}
