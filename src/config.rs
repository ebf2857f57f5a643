use anyhow::{Context, Result, anyhow};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_ttl: usize,

    // Admin shared secret, either plain or as an argon2 PHC string
    pub admin_password: Option<String>,
    pub admin_password_hash: Option<String>,

    // Rate limiting
    pub rate_login_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
    pub seed_file: Option<String>,

    pub email: EmailConfig,
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub admin_email: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            server_addr: get("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            database_url: get("DATABASE_URL").unwrap_or_else(|| "sqlite:leave.db".to_string()),
            jwt_secret: get("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET must be set"))?,
            access_token_ttl: parse_or(get("ACCESS_TOKEN_TTL"), "ACCESS_TOKEN_TTL", 3600)?, // 1 hour

            admin_password: get("ADMIN_PASSWORD"),
            admin_password_hash: get("ADMIN_PASSWORD_HASH"),

            rate_login_per_min: parse_or(get("RATE_LOGIN_PER_MIN"), "RATE_LOGIN_PER_MIN", 10)?,

            api_prefix: get("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            log_dir: get("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            seed_file: get("SEED_FILE"),

            email: EmailConfig {
                enabled: parse_flag(get("ENABLE_EMAIL"), "ENABLE_EMAIL")?,
                smtp_server: get("SMTP_SERVER").unwrap_or_else(|| "smtp.gmail.com".to_string()),
                smtp_port: parse_or(get("SMTP_PORT"), "SMTP_PORT", 587)?,
                admin_email: get("ADMIN_EMAIL"),
                password: get("EMAIL_PASSWORD"),
            },
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_flag(value: Option<String>, key: &str) -> Result<bool> {
    let Some(raw) = value else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{key} must be a boolean, got {raw:?}")),
    }
}
