use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub public_url: String,
    pub allowed_origins: Vec<String>,
    pub max_upload_size: usize,
    pub upload_dir: PathBuf,
    pub asset_host: Option<AssetHostConfig>,
    pub chat: Option<ChatConfig>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub log_level: String,
}

/// Remote asset host. Presence of the URL toggles cloud storage over
/// the local uploads directory.
#[derive(Debug, Clone)]
pub struct AssetHostConfig {
    pub url: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("MEDPASS_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MEDPASS_HOST: {e}"))?;

        let port: u16 = env_or("MEDPASS_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid MEDPASS_PORT: {e}"))?;

        let public_url = env_or("MEDPASS_PUBLIC_URL", &format!("http://{host}:{port}"));

        let allowed_origins: Vec<String> = env_or("MEDPASS_ALLOWED_ORIGINS", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .collect();

        let max_upload_size: usize = env_or("MEDPASS_MAX_UPLOAD_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid MEDPASS_MAX_UPLOAD_SIZE: {e}"))?;

        let upload_dir = PathBuf::from(env_or("MEDPASS_UPLOAD_DIR", "uploads"));

        let asset_host = match std::env::var("MEDPASS_ASSET_HOST_URL").ok() {
            Some(url) => Some(AssetHostConfig {
                url,
                token: env_required("MEDPASS_ASSET_HOST_TOKEN")?,
            }),
            None => None,
        };

        let chat = match (
            std::env::var("MEDPASS_CHAT_API_URL").ok(),
            std::env::var("MEDPASS_CHAT_API_KEY").ok(),
        ) {
            (Some(api_url), Some(api_key)) => Some(ChatConfig { api_url, api_key }),
            _ => None,
        };

        let bootstrap_admin = match (
            std::env::var("MEDPASS_ADMIN_EMAIL").ok(),
            std::env::var("MEDPASS_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                password,
                name: env_or("MEDPASS_ADMIN_NAME", "Administrator"),
            }),
            _ => None,
        };

        let log_level = env_or("MEDPASS_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            public_url,
            allowed_origins,
            max_upload_size,
            upload_dir,
            asset_host,
            chat,
            bootstrap_admin,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
