use anyhow::{bail, Context};
use axum::http::HeaderValue;
use questlearn_core::scoring::ScoreAccrual;

use crate::auth::directory::DirectoryMode;
use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// How completion awards are folded into the user score.
    pub score_accrual: ScoreAccrual,
    /// User promoted to administrator at startup, if any.
    pub admin_username: Option<String>,
    /// Insert the demo catalog on an empty database.
    pub seed_demo_data: bool,
    /// Domain used to build e-mail addresses for directory users without one.
    pub email_domain: String,
    /// Which credential directory backs `/auth/login`.
    pub directory_mode: DirectoryMode,
    /// Raw `DIRECTORY_USERS` value for the static directory.
    pub directory_users: Option<String>,
    /// Mark the session cookie `Secure` (default: `false`).
    pub cookie_secure: bool,
    /// JWT signing configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `SCORE_ACCRUAL`         | `incremental`           |
    /// | `ADMIN_USERNAME`        | unset                   |
    /// | `SEED_DEMO_DATA`        | `false`                 |
    /// | `EMAIL_DOMAIN`          | `questlearn.local`      |
    /// | `DIRECTORY_MODE`        | `development`           |
    /// | `DIRECTORY_USERS`       | unset                   |
    /// | `COOKIE_SECURE`         | `false`                 |
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .context("PORT must be a valid u16")?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{origin}'"))?;
        }

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", "30")
            .parse()
            .context("SHUTDOWN_TIMEOUT_SECS must be a valid u64")?;

        let score_accrual = ScoreAccrual::from_str_value(&env_or("SCORE_ACCRUAL", "incremental"))?;

        let admin_username = std::env::var("ADMIN_USERNAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let seed_demo_data = parse_bool("SEED_DEMO_DATA", &env_or("SEED_DEMO_DATA", "false"))?;

        let email_domain = env_or("EMAIL_DOMAIN", "questlearn.local");

        let directory_mode = DirectoryMode::from_str_value(&env_or("DIRECTORY_MODE", "development"))?;
        let directory_users = std::env::var("DIRECTORY_USERS").ok();
        if directory_mode == DirectoryMode::Static && directory_users.is_none() {
            bail!("DIRECTORY_USERS must be set when DIRECTORY_MODE=static");
        }

        let cookie_secure = parse_bool("COOKIE_SECURE", &env_or("COOKIE_SECURE", "false"))?;

        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            score_accrual,
            admin_username,
            seed_demo_data,
            email_domain,
            directory_mode,
            directory_users,
            cookie_secure,
            jwt,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`, case-insensitively.
fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}
