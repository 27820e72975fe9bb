use std::{env, net::SocketAddr};

use thiserror::Error;

/// Fallback signing secret for session cookies outside production.
const LOCAL_SESSION_SECRET: &str = "blog-portal-local-session-secret";

/// AppConfig
///
/// Holds the application's entire configuration state. It is read once at startup
/// and never mutated afterwards; handlers pull it out of `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and secret fallbacks.
    pub env: Env,
    // Developer or user feature set for the blog subtree.
    pub mode: Mode,
    // Shared gate password. `None` makes the gate impassable.
    pub access_password: Option<String>,
    // Base URL of the external posts REST API (no trailing slash).
    pub api_base_url: String,
    // Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    // HMAC secret used to sign session cookies.
    pub session_secret: String,
}

/// Env
///
/// Runtime context, used to switch between local conveniences (pretty logs,
/// fallback secrets) and production (JSON logs, mandatory secrets).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Mode
///
/// Selects the developer or end-user feature set of the blog. Fixed for the
/// lifetime of the process.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Developer,
    User,
}

impl Mode {
    /// Only the exact string `"true"` enables developer mode.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("true") => Mode::Developer,
            _ => Mode::User,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BLOG_ACCESS_PASSWORD must be set when developer mode is enabled")]
    MissingAccessPassword,
    #[error("{0} must be set in production")]
    MissingSecret(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl Default for AppConfig {
    /// Safe values for tests: user mode, no password, local secret.
    fn default() -> Self {
        Self {
            env: Env::Local,
            mode: Mode::User,
            access_password: None,
            api_base_url: "http://localhost:8000/api".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            session_secret: LOCAL_SESSION_SECRET.to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Errors
    /// Fails fast on anything that would leave the blog unusable: developer mode
    /// without a gate password, production without a session secret, or values
    /// that do not parse.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let mode = Mode::from_flag(env::var("BLOG_DEVELOPER_MODE").ok().as_deref());
        let access_password = env::var("BLOG_ACCESS_PASSWORD").ok();

        if mode == Mode::Developer && access_password.is_none() {
            return Err(ConfigError::MissingAccessPassword);
        }

        let session_secret = match env {
            Env::Production => env::var("SESSION_SECRET")
                .map_err(|_| ConfigError::MissingSecret("SESSION_SECRET"))?,
            Env::Local => {
                env::var("SESSION_SECRET").unwrap_or_else(|_| LOCAL_SESSION_SECRET.to_string())
            }
        };

        let defaults = Self::default();

        let api_base_url = env::var("BLOG_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let bind_addr = match env::var("BLOG_BIND_ADDR") {
            Ok(value) => value.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
                name: "BLOG_BIND_ADDR",
                value,
            })?,
            Err(_) => defaults.bind_addr,
        };

        Ok(Self {
            env,
            mode,
            access_password,
            api_base_url,
            bind_addr,
            session_secret,
        })
    }

    /// The configured gate password, or the typed error explaining why the gate
    /// can never be passed.
    pub fn expected_password(&self) -> Result<&str, ConfigError> {
        self.access_password
            .as_deref()
            .ok_or(ConfigError::MissingAccessPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_true_enables_developer_mode() {
        assert_eq!(Mode::from_flag(Some("true")), Mode::Developer);
        assert_eq!(Mode::from_flag(Some("TRUE")), Mode::User);
        assert_eq!(Mode::from_flag(Some("1")), Mode::User);
        assert_eq!(Mode::from_flag(Some("")), Mode::User);
        assert_eq!(Mode::from_flag(None), Mode::User);
    }

    #[test]
    fn expected_password_reports_absence() {
        let config = AppConfig::default();
        assert_eq!(
            config.expected_password(),
            Err(ConfigError::MissingAccessPassword)
        );

        let config = AppConfig {
            access_password: Some("hunter2".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.expected_password(), Ok("hunter2"));
    }
}
