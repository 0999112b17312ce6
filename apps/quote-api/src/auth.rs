//! Session-cookie authentication
//!
//! Tokens are random, live in memory, and expire after 24 hours. The admin
//! area is a single operator, so there is no user table to consult.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "admin_session";
const SESSION_TTL_HOURS: i64 = 24;

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new session token.
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        self.lock().insert(token.clone(), expires_at);
        token
    }

    /// True when the token exists and has not expired. Expired entries are
    /// dropped on the way through.
    pub fn validate(&self, token: &str) -> bool {
        let now = Utc::now();
        let mut sessions = self.lock();
        sessions.retain(|_, expires_at| *expires_at > now);
        sessions.contains_key(token)
    }

    pub fn revoke(&self, token: &str) {
        self.lock().remove(token);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Build the Set-Cookie value for a fresh login.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_TTL_HOURS * 3600
    )
}

/// Build the Set-Cookie value that clears the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Pull the session token out of a Cookie header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

/// Extractor that rejects requests without a valid session.
pub struct RequireAuth;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(token_from_cookie_header)
            .ok_or(ApiError::Unauthorized)?;

        if state.sessions.validate(token) {
            Ok(RequireAuth)
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_tokens_validate_until_revoked() {
        let store = SessionStore::new();
        let token = store.create();

        assert!(store.validate(&token));
        store.revoke(&token);
        assert!(!store.validate(&token));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let store = SessionStore::new();
        assert!(!store.validate("nope"));
    }

    #[test]
    fn cookie_header_parsing() {
        assert_eq!(
            token_from_cookie_header("admin_session=abc123"),
            Some("abc123")
        );
        assert_eq!(
            token_from_cookie_header("theme=dark; admin_session=abc123; lang=en"),
            Some("abc123")
        );
        assert_eq!(token_from_cookie_header("theme=dark"), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok");
        assert!(cookie.starts_with("admin_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
