// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed session cookies and the session-required middleware.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use std::sync::Arc;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "li_session";

/// Session extracted from a valid cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
}

/// Fresh random session ID (32 hex characters).
pub fn new_session_id() -> anyhow::Result<String> {
    let mut buf = [0u8; 16];
    SystemRandom::new()
        .fill(&mut buf)
        .map_err(|_| anyhow::anyhow!("Failed to generate session ID"))?;
    Ok(hex::encode(buf))
}

/// Cookie value for a session: `"<id>.<signature_hex>"`.
pub fn sign_session_id(session_id: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(signing_key)
        .map_err(|e| anyhow::anyhow!("HMAC init failed: {}", e))?;
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();
    Ok(format!("{}.{}", session_id, hex::encode(signature)))
}

/// Session ID carried by a cookie value, if the signature checks out.
pub fn verify_session_cookie(value: &str, signing_key: &[u8]) -> Option<String> {
    let (session_id, signature_hex) = value.rsplit_once('.')?;
    if session_id.is_empty() {
        return None;
    }
    let signature = hex::decode(signature_hex).ok()?;

    let mut mac = HmacSha256::new_from_slice(signing_key).ok()?;
    mac.update(session_id.as_bytes());
    if mac.verify_slice(&signature).is_err() {
        tracing::warn!("Session cookie signature mismatch");
        return None;
    }

    Some(session_id.to_string())
}

/// Session cookie holding a signed value.
pub fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Session of the request, if it carries a valid cookie.
pub fn session_from_jar(jar: &CookieJar, signing_key: &[u8]) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    verify_session_cookie(cookie.value(), signing_key).map(|id| Session { id })
}

/// Middleware that requires a session connected to LinkedIn.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let session = session_from_jar(&jar, &state.config.session_signing_key)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let provider = state.provider_for(&session.id).map_err(|e| {
        tracing::error!(error = %e, "LinkedIn provider unavailable");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !provider.is_user_connected() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_session_key_32_bytes_min!!";

    #[test]
    fn test_sign_and_verify() {
        let id = new_session_id().unwrap();
        assert_eq!(id.len(), 32);

        let value = sign_session_id(&id, KEY).unwrap();
        assert!(value.starts_with(&id));
        assert_eq!(verify_session_cookie(&value, KEY), Some(id));
    }

    #[test]
    fn test_tampered_cookie_rejected() {
        let value = sign_session_id("abc123", KEY).unwrap();
        let tampered = value.replacen("abc123", "abc124", 1);

        assert_eq!(verify_session_cookie(&tampered, KEY), None);
        assert_eq!(verify_session_cookie(&value, b"another_key"), None);
        assert_eq!(verify_session_cookie("abc123", KEY), None);
        assert_eq!(verify_session_cookie("abc123.zz", KEY), None);
        assert_eq!(verify_session_cookie(".deadbeef", KEY), None);
    }

    #[test]
    fn test_session_from_jar() {
        let value = sign_session_id("s1", KEY).unwrap();
        let jar = CookieJar::new().add(session_cookie(value));

        assert_eq!(
            session_from_jar(&jar, KEY),
            Some(Session {
                id: "s1".to_string()
            })
        );
        assert_eq!(session_from_jar(&CookieJar::new(), KEY), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("v".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
