//! Environment configuration

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use identity::AuthConfig;
use identity::application::config::MIN_TOKEN_SECRET_LEN;
use otp::OtpConfig;
use platform::mail::SmtpConfig;

const DEFAULT_TOKEN_TTL_MINUTES: u64 = 30;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

pub struct AppConfig {
    /// `None` selects the in-memory stores
    pub database_url: Option<String>,
    pub auth: AuthConfig,
    pub otp: OtpConfig,
    /// `None` selects the log-only mailer
    pub smtp: Option<SmtpConfig>,
    pub frontend_origins: Vec<HeaderValue>,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: optional("DATABASE_URL"),
            auth: auth_config()?,
            otp: OtpConfig::default(),
            smtp: smtp_config()?,
            frontend_origins: frontend_origins(),
            bind_addr: optional("BIND_ADDR")
                .as_deref()
                .unwrap_or(DEFAULT_BIND_ADDR)
                .parse()
                .context("BIND_ADDR must be host:port")?,
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn token_ttl(raw: Option<&str>) -> anyhow::Result<Duration> {
    let minutes = match raw {
        Some(raw) => raw
            .parse::<u64>()
            .context("TOKEN_TTL_MINUTES must be a whole number of minutes")?,
        None => DEFAULT_TOKEN_TTL_MINUTES,
    };
    let secs = minutes
        .checked_mul(60)
        .context("TOKEN_TTL_MINUTES is out of range")?;
    Ok(Duration::from_secs(secs))
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let ttl = token_ttl(optional("TOKEN_TTL_MINUTES").as_deref())?;

    let secret = match optional("TOKEN_SECRET") {
        Some(b64) => {
            platform::crypto::from_base64(&b64).context("TOKEN_SECRET must be base64")?
        }
        None if cfg!(debug_assertions) => {
            tracing::warn!("TOKEN_SECRET not set; using a random key, tokens die with the process");
            platform::crypto::random_bytes(MIN_TOKEN_SECRET_LEN)
        }
        None => bail!("TOKEN_SECRET must be set in production"),
    };

    let pepper = optional("PASSWORD_PEPPER").map(String::into_bytes);

    AuthConfig::new(secret, ttl)
        .map(|config| config.with_pepper(pepper))
        .map_err(anyhow::Error::msg)
}

fn smtp_config() -> anyhow::Result<Option<SmtpConfig>> {
    let Some(host) = optional("SMTP_HOST") else {
        return Ok(None);
    };

    let port = match optional("SMTP_PORT") {
        Some(raw) => raw.parse().context("SMTP_PORT must be a port number")?,
        None => DEFAULT_SMTP_PORT,
    };

    Ok(Some(SmtpConfig {
        host,
        port,
        username: optional("SMTP_USERNAME").unwrap_or_default(),
        password: optional("SMTP_PASSWORD").unwrap_or_default(),
        from: optional("MAIL_FROM").context("MAIL_FROM must be set when SMTP_HOST is")?,
    }))
}

fn frontend_origins() -> Vec<HeaderValue> {
    optional("FRONTEND_ORIGINS")
        .as_deref()
        .unwrap_or(DEFAULT_FRONTEND_ORIGINS)
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ttl_defaults_to_thirty_minutes() {
        assert_eq!(token_ttl(None).unwrap(), Duration::from_secs(30 * 60));
        assert_eq!(token_ttl(Some("45")).unwrap(), Duration::from_secs(45 * 60));
    }

    #[test]
    fn token_ttl_rejects_overflow_instead_of_wrapping() {
        let err = token_ttl(Some(&u64::MAX.to_string())).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(token_ttl(Some("ten")).is_err());
    }
}
