use blog_portal::{
    AppConfig, Mode,
    config::{ConfigError, Env},
};
use serial_test::serial;
use std::{env, panic};

const CONFIG_VARS: [&str; 6] = [
    "APP_ENV",
    "BLOG_DEVELOPER_MODE",
    "BLOG_ACCESS_PASSWORD",
    "BLOG_API_URL",
    "BLOG_BIND_ADDR",
    "SESSION_SECRET",
];

// --- Setup/Teardown Utilities ---

/// Runs `test` with exactly the given configuration variables set (all others
/// cleared) and restores the original environment afterwards.
fn run_with_env<T, R>(vars: &[(&str, &str)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = panic::catch_unwind(test);

    unsafe {
        for (key, original_value) in originals {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_defaults_to_local_user_mode() {
    let config = run_with_env(&[], AppConfig::load).expect("defaults must load");

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.mode, Mode::User);
    assert_eq!(config.access_password, None);
    assert_eq!(config.api_base_url, "http://localhost:8000/api");
    assert_eq!(config.bind_addr.port(), 3000);
}

#[test]
#[serial]
fn test_developer_mode_with_password() {
    let config = run_with_env(
        &[
            ("BLOG_DEVELOPER_MODE", "true"),
            ("BLOG_ACCESS_PASSWORD", "open sesame"),
        ],
        AppConfig::load,
    )
    .expect("developer config must load");

    assert_eq!(config.mode, Mode::Developer);
    assert_eq!(config.expected_password(), Ok("open sesame"));
}

#[test]
#[serial]
fn test_developer_flag_is_exact() {
    let config = run_with_env(&[("BLOG_DEVELOPER_MODE", "True")], AppConfig::load)
        .expect("user config must load");
    assert_eq!(config.mode, Mode::User);
}

#[test]
#[serial]
fn test_developer_mode_without_password_fails_fast() {
    let result = run_with_env(&[("BLOG_DEVELOPER_MODE", "true")], AppConfig::load);
    assert_eq!(result.unwrap_err(), ConfigError::MissingAccessPassword);
}

#[test]
#[serial]
fn test_user_mode_does_not_need_password() {
    let config = run_with_env(&[("BLOG_DEVELOPER_MODE", "false")], AppConfig::load)
        .expect("user config must load");
    assert_eq!(config.mode, Mode::User);
    assert!(config.expected_password().is_err());
}

#[test]
#[serial]
fn test_production_requires_session_secret() {
    let result = run_with_env(&[("APP_ENV", "production")], AppConfig::load);
    assert_eq!(
        result.unwrap_err(),
        ConfigError::MissingSecret("SESSION_SECRET")
    );

    let config = run_with_env(
        &[("APP_ENV", "production"), ("SESSION_SECRET", "prod-secret")],
        AppConfig::load,
    )
    .expect("production config must load");
    assert_eq!(config.env, Env::Production);
    assert_eq!(config.session_secret, "prod-secret");
}

#[test]
#[serial]
fn test_api_url_trailing_slash_is_trimmed() {
    let config = run_with_env(
        &[("BLOG_API_URL", "https://api.example.com/v1/")],
        AppConfig::load,
    )
    .expect("config must load");
    assert_eq!(config.api_base_url, "https://api.example.com/v1");
}

#[test]
#[serial]
fn test_invalid_bind_address_is_rejected() {
    let result = run_with_env(&[("BLOG_BIND_ADDR", "localhost")], AppConfig::load);
    assert!(matches!(
        result.unwrap_err(),
        ConfigError::Invalid {
            name: "BLOG_BIND_ADDR",
            ..
        }
    ));
}
