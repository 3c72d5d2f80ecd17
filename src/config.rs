use crate::error::ConfigError;
use chrono::Duration;
use std::str::FromStr;

/// Development-only signing secret. Rejected in production.
pub const DEV_FALLBACK_SECRET: &str = "a-fallback-key-for-dev";

/// One year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::Invalid {
                key: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub secret_key: String,
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub session_ttl_hours: i64,
}

impl Settings {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV") {
            Some(value) => value.parse()?,
            None => Environment::Development,
        };

        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEV_FALLBACK_SECRET.to_string());

        let port = parse_or(&lookup, "PORT", 8080)?;
        let session_ttl_hours = parse_or(&lookup, "SESSION_TTL_HOURS", 24)?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::Invalid {
                key: "SESSION_TTL_HOURS",
                value: session_ttl_hours.to_string(),
            });
        }

        let settings = Settings {
            secret_key,
            environment,
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            session_ttl_hours,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.uses_fallback_secret() {
            return Err(ConfigError::InsecureSecret);
        }
        Ok(())
    }

    pub fn uses_fallback_secret(&self) -> bool {
        self.secret_key == DEV_FALLBACK_SECRET
    }

    /// Falls back to a day for hand-built settings outside the accepted range.
    pub fn session_ttl(&self) -> Duration {
        Duration::try_hours(self.session_ttl_hours)
            .filter(|_| (1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours))
            .unwrap_or_else(|| Duration::hours(24))
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for tests and local tooling.
    pub fn development(secret_key: &str) -> Self {
        Settings {
            secret_key: secret_key.to_string(),
            environment: Environment::Development,
            host: "127.0.0.1".to_string(),
            port: 0,
            session_ttl_hours: 24,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
