use std::{
    convert::Infallible,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    gate::AuthState,
    navigation::BLOG_PREFIX,
};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "blog_session";

/// Claims
///
/// Payload of the session token. Its presence with a valid signature is what
/// marks a browser session as authorized; there is nothing else to store.
/// There is no `exp` claim: authorization lasts as long as the browser keeps
/// the session cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Random session identifier, used only for log correlation.
    pub sub: Uuid,
    /// Issued at (seconds since the epoch).
    pub iat: usize,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Signs a fresh session token for an authorized browser.
pub fn issue_session_token(config: &AppConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: Uuid::new_v4(),
        iat: now_secs() as usize,
    };
    let key = EncodingKey::from_secret(config.session_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &key)?;
    tracing::debug!(session = %claims.sub, "issued blog session token");
    Ok(token)
}

/// Validates a session token's signature. Tokens never expire on their own.
pub fn verify_session_token(
    token: &str,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

/// session_cookie
///
/// Wraps a token in the cookie sent back after a granted submission. No
/// `Max-Age` is set, so the browser drops it when the session ends.
pub fn session_cookie(token: String, config: &AppConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path(BLOG_PREFIX)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.env == Env::Production)
        .build()
}

/// AuthState Extractor
///
/// Resolves the session's `AuthState` from the request cookies. It never
/// rejects: a missing or tampered cookie simply reads as
/// `Unauthorized`, leaving the route selector to decide what to show.
impl<S> FromRequestParts<S> for AuthState
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(AuthState::Unauthorized);
        };

        match verify_session_token(cookie.value(), &config.session_secret) {
            Ok(claims) => {
                tracing::trace!(session = %claims.sub, "session cookie accepted");
                Ok(AuthState::Authorized)
            }
            Err(e) => {
                tracing::debug!("ignoring invalid session cookie: {}", e);
                Ok(AuthState::Unauthorized)
            }
        }
    }
}
