use std::env;
use std::time::Duration;

use crate::shared::constants::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE, PLACEHOLDER_IMAGE_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub pipeline: PipelineConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    pub frontend_url: String,
}

/// How records are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Hosted content/data platform over HTTP
    Http,
    /// Process-local store, lost on restart (local development only)
    Memory,
}

/// Managed backend (record store + member directory) configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub mode: BackendMode,
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwks_url: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
    /// Hosted sign-in page of the member provider
    pub login_url: String,
    /// Hosted sign-out endpoint of the member provider
    pub logout_url: String,
}

/// Report submission pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Simulated inference time of the waste classifier
    pub classification_delay: Duration,
    /// Image reference stored on every submitted report
    pub placeholder_image_url: String,
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,
    /// Age after which an unsubmitted draft is discarded
    pub draft_ttl: Duration,
    /// Opening a draft beyond this count discards the member's oldest one
    pub max_open_drafts_per_member: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            pipeline: PipelineConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 12 * 1024 * 1024; // 12MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            frontend_url,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let mode = match env::var("BACKEND_MODE")
            .unwrap_or_else(|_| "http".to_string())
            .to_lowercase()
            .as_str()
        {
            "http" => BackendMode::Http,
            "memory" => BackendMode::Memory,
            other => return Err(format!("Invalid BACKEND_MODE: {}", other)),
        };

        // The HTTP backend cannot work without an endpoint and key
        let (base_url, api_key) = match mode {
            BackendMode::Http => (
                env::var("BACKEND_BASE_URL")
                    .map_err(|_| "BACKEND_BASE_URL must be set".to_string())?,
                env::var("BACKEND_API_KEY")
                    .map_err(|_| "BACKEND_API_KEY must be set".to_string())?,
            ),
            BackendMode::Memory => (
                env::var("BACKEND_BASE_URL").unwrap_or_default(),
                env::var("BACKEND_API_KEY").unwrap_or_default(),
            ),
        };

        let timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BACKEND_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            mode,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AuthConfig {
    const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute

    pub fn from_env() -> Result<Self, String> {
        let issuer = env::var("AUTH_ISSUER")
            .map_err(|_| "AUTH_ISSUER environment variable is required".to_string())?;

        let audience = env::var("AUTH_AUDIENCE")
            .map_err(|_| "AUTH_AUDIENCE environment variable is required".to_string())?;

        let jwks_url = env::var("AUTH_JWKS_URL")
            .unwrap_or_else(|_| format!("{}/jwks", issuer.trim_end_matches('/')));

        let jwks_cache_ttl_secs = env::var("JWKS_CACHE_TTL")
            .unwrap_or_else(|_| Self::DEFAULT_JWKS_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWKS_CACHE_TTL must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        let login_url = env::var("AUTH_LOGIN_URL")
            .unwrap_or_else(|_| format!("{}/login", issuer.trim_end_matches('/')));
        let logout_url = env::var("AUTH_LOGOUT_URL")
            .unwrap_or_else(|_| format!("{}/logout", issuer.trim_end_matches('/')));

        Ok(Self {
            issuer,
            audience,
            jwks_url,
            jwks_cache_ttl: Duration::from_secs(jwks_cache_ttl_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
            login_url,
            logout_url,
        })
    }
}

impl PipelineConfig {
    const DEFAULT_CLASSIFICATION_DELAY_MS: u64 = 2000;
    const DEFAULT_DRAFT_TTL_SECS: u64 = 60 * 60;
    const DEFAULT_MAX_OPEN_DRAFTS_PER_MEMBER: usize = 5;

    pub fn from_env() -> Result<Self, String> {
        let delay_ms = env::var("CLASSIFICATION_DELAY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_CLASSIFICATION_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "CLASSIFICATION_DELAY_MS must be a valid number".to_string())?;

        let placeholder_image_url = env::var("PLACEHOLDER_IMAGE_URL")
            .unwrap_or_else(|_| PLACEHOLDER_IMAGE_URL.to_string());

        let fallback_latitude = env::var("FALLBACK_LATITUDE")
            .ok()
            .map(|v| v.parse::<f64>())
            .transpose()
            .map_err(|_| "FALLBACK_LATITUDE must be a valid number".to_string())?
            .unwrap_or(FALLBACK_LATITUDE);

        let fallback_longitude = env::var("FALLBACK_LONGITUDE")
            .ok()
            .map(|v| v.parse::<f64>())
            .transpose()
            .map_err(|_| "FALLBACK_LONGITUDE must be a valid number".to_string())?
            .unwrap_or(FALLBACK_LONGITUDE);

        let draft_ttl_secs = env::var("DRAFT_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_DRAFT_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DRAFT_TTL_SECS must be a valid number".to_string())?;

        let max_open_drafts_per_member = env::var("MAX_OPEN_DRAFTS_PER_MEMBER")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_OPEN_DRAFTS_PER_MEMBER.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_OPEN_DRAFTS_PER_MEMBER must be a valid number".to_string())?;
        if max_open_drafts_per_member == 0 {
            return Err("MAX_OPEN_DRAFTS_PER_MEMBER must be at least 1".to_string());
        }

        Ok(Self {
            classification_delay: Duration::from_millis(delay_ms),
            placeholder_image_url,
            fallback_latitude,
            fallback_longitude,
            draft_ttl: Duration::from_secs(draft_ttl_secs),
            max_open_drafts_per_member,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            classification_delay: Duration::from_millis(Self::DEFAULT_CLASSIFICATION_DELAY_MS),
            placeholder_image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            fallback_latitude: FALLBACK_LATITUDE,
            fallback_longitude: FALLBACK_LONGITUDE,
            draft_ttl: Duration::from_secs(Self::DEFAULT_DRAFT_TTL_SECS),
            max_open_drafts_per_member: Self::DEFAULT_MAX_OPEN_DRAFTS_PER_MEMBER,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Clean Madurai API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Citizen cleanliness reporting API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
