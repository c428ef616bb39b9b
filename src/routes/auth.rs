// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LinkedIn OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::session::{
    new_session_id, session_cookie, session_from_jar, sign_session_id, SESSION_COOKIE,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/linkedin", get(auth_start))
        .route("/auth/linkedin/callback", get(auth_callback))
        .route("/auth/logout", get(logout))
}

/// Start OAuth flow - obtain a request token and redirect to LinkedIn.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    let signing_key = &state.config.session_signing_key;

    // Reuse the browser's session if it has one.
    let (session_id, jar) = match session_from_jar(&jar, signing_key) {
        Some(session) => (session.id, jar),
        None => {
            let id = new_session_id()?;
            let value = sign_session_id(&id, signing_key)?;
            (id, jar.add(session_cookie(value)))
        }
    };

    let provider = state.provider_for(&session_id)?;
    let auth_url = provider.begin_login().await?;

    tracing::info!("Starting OAuth flow, redirecting to LinkedIn");

    Ok((jar, Redirect::temporary(&auth_url)))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    oauth_token: Option<String>,
    #[serde(default)]
    oauth_verifier: Option<String>,
    /// Set by LinkedIn when the user declines (`user_refused`)
    #[serde(default)]
    oauth_problem: Option<String>,
}

/// OAuth callback - exchange the verifier for an access token.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let frontend_url = &state.config.frontend_url;
    let fail = |error: &str| Redirect::temporary(&format!("{}?error={}", frontend_url, error));

    if let Some(problem) = params.oauth_problem {
        tracing::warn!(problem = %problem, "OAuth error from LinkedIn");
        return fail(urlencoding::encode(&problem).as_ref());
    }

    let Some(session) = session_from_jar(&jar, &state.config.session_signing_key) else {
        tracing::warn!("OAuth callback without a valid session cookie");
        return fail("session_expired");
    };

    let mut provider = match state.provider_for(&session.id) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!(error = %e, "Cannot create LinkedIn provider");
            return fail("configuration_error");
        }
    };

    let oauth_token = params.oauth_token.unwrap_or_default();
    if let Err(e) = provider
        .finish_login(&oauth_token, params.oauth_verifier.as_deref())
        .await
    {
        tracing::warn!(error = %e, code = e.code(), "LinkedIn login failed");
        return fail("authentication_failed");
    }

    tracing::info!("OAuth successful, session connected");
    Redirect::temporary(frontend_url)
}

/// Logout - forget the session's LinkedIn tokens and clear the cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(session) = session_from_jar(&jar, &state.config.session_signing_key) {
        match state.provider_for(&session.id) {
            Ok(mut provider) => provider.logout(),
            Err(e) => tracing::warn!(error = %e, "Cannot create LinkedIn provider for logout"),
        }
        state.sessions.remove_session(&session.id);
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::temporary(&state.config.frontend_url))
}

