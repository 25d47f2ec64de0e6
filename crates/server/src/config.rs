use std::net::SocketAddr;

use anyhow::{Context, bail};

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_FETCH_TIMEOUT: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT: u64 = 60;

/// Settings read from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind: SocketAddr,
    /// Upstream page fetch timeout in seconds.
    pub fetch_timeout: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout: u64,
    /// Identities allowed to list every stored analysis.
    pub super_users: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let Some(database_url) = get("DATABASE_URL").filter(|v| !v.trim().is_empty()) else {
            bail!("DATABASE_URL must be set");
        };

        let bind = get("LEXISCOPE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind
            .parse()
            .with_context(|| format!("Invalid LEXISCOPE_BIND address: {}", bind))?;

        Ok(Self {
            database_url,
            bind,
            fetch_timeout: parse_secs(&get, "LEXISCOPE_FETCH_TIMEOUT", DEFAULT_FETCH_TIMEOUT)?,
            request_timeout: parse_secs(&get, "LEXISCOPE_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT)?,
            super_users: get("LEXISCOPE_SUPER_USERS").map(|v| parse_super_users(&v)).unwrap_or_default(),
        })
    }

    pub fn is_super_user(&self, identity: &str) -> bool {
        self.super_users.iter().any(|u| u.eq_ignore_ascii_case(identity))
    }
}

fn parse_secs(get: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> anyhow::Result<u64> {
    match get(key) {
        None => Ok(default),
        Some(raw) => {
            let secs: u64 = raw.trim().parse().with_context(|| format!("{} must be a number of seconds", key))?;
            if secs == 0 {
                bail!("{} must be greater than zero", key);
            }
            Ok(secs)
        }
    }
}

fn parse_super_users(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
