use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::{decode_secret_key, AuthConfig};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub auth: AuthConfig,
    pub seed_demo_data: bool,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CAL_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid CAL_LISTEN_ADDR")?;
        let db_path = std::env::var("CAL_DB_PATH").unwrap_or_else(|_| "./db/calendar.db".into());
        let cors_allow = parse_origins(
            &std::env::var("CAL_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = std::env::var("CAL_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .context("Invalid CAL_REQUEST_TIMEOUT_MS")?;

        let secret = std::env::var("CAL_JWT_SECRET").context("CAL_JWT_SECRET must be set")?;
        let jwt_secret = decode_secret_key(&secret).context("Invalid CAL_JWT_SECRET")?;
        let audience = std::env::var("CAL_JWT_AUDIENCE").unwrap_or_else(|_| "api".into());
        let issuer = std::env::var("CAL_JWT_ISSUER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let seed_demo_data = match std::env::var("CAL_SEED_DEMO_DATA") {
            Ok(raw) => parse_flag(&raw).context("Invalid CAL_SEED_DEMO_DATA")?,
            Err(_) => true,
        };
        let log_format = std::env::var("CAL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            auth: AuthConfig {
                jwt_secret,
                audience,
                issuer,
            },
            seed_demo_data,
            log_format,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}
