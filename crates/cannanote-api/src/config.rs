// Server configuration loaded from environment variables
// Decision: No DATABASE_URL means dev mode with in-memory storage
// Decision: Session lifetime is configured in minutes

use anyhow::{bail, Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_SESSION_MAX_AGE_MINUTES: i64 = 7 * 24 * 60; // 7 days
const MAX_SESSION_MAX_AGE_MINUTES: i64 = 10 * 365 * 24 * 60; // 10 years

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// PostgreSQL connection string; `None` selects in-memory storage
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    /// Session lifetime in minutes, applied to both the store and the cookie
    pub session_max_age_minutes: i64,
    /// Mark the session cookie `Secure` (set behind HTTPS)
    pub cookie_secure: bool,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_max_age_minutes: DEFAULT_SESSION_MAX_AGE_MINUTES,
            cookie_secure: false,
            run_migrations: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment (after `.env`)
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!("Loaded .env from {:?}", path);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };

        let session_max_age_minutes = match get("SESSION_MAX_AGE") {
            Some(raw) => {
                let minutes = raw
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("SESSION_MAX_AGE must be minutes, got {raw:?}"))?;
                if minutes <= 0 {
                    bail!("SESSION_MAX_AGE must be positive, got {minutes}");
                }
                if minutes > MAX_SESSION_MAX_AGE_MINUTES {
                    bail!(
                        "SESSION_MAX_AGE must be at most {MAX_SESSION_MAX_AGE_MINUTES} minutes, \
                         got {minutes}"
                    );
                }
                minutes
            }
            None => defaults.session_max_age_minutes,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            host: get("HOST").unwrap_or(defaults.host),
            port,
            session_max_age_minutes,
            cookie_secure: get("COOKIE_SECURE")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.cookie_secure),
            run_migrations: get("RUN_MIGRATIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.run_migrations),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_max_age_minutes)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
