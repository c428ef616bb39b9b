// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LinkedIn provider adapter.
//!
//! Handles:
//! - The OAuth1 three-legged login (request token, authorization, access token)
//! - Profile, connections and network update retrieval
//! - Posting shares on the user's behalf

use crate::error::ProviderError;
use crate::models::tokens::keys;
use crate::models::{
    ActivityScope, Credentials, PostedStatus, StatusUpdate, TokenPair, UserActivity, UserContact,
    UserProfile,
};
use crate::services::linkedin_xml;
use crate::services::oauth1::{
    parse_form, ApiRequest, HttpOAuth1Client, OAuth1Client, ProviderFailure, ProviderResponse,
};
use crate::services::token_store::TokenStore;
use crate::time_utils::format_acceptable_timestamp;
use std::sync::Arc;

/// Provider name used in messages and token namespaces.
pub const PROVIDER_ID: &str = "LinkedIn";

/// Fields requested from the profile endpoint.
const PROFILE_FIELDS: &str = "~:(id,first-name,last-name,public-profile-url,picture-url,\
     picture-urls::(original),email-address,date-of-birth,phone-numbers,headline)";

/// Fields requested for each connection.
const CONNECTION_FIELDS: &str =
    "~/connections:(id,first-name,last-name,picture-url,public-profile-url,summary)";

/// LinkedIn OAuth and API locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInEndpoints {
    /// Base of the request/access token endpoints
    pub oauth_base_url: String,
    /// Base of the v1 REST API
    pub api_base_url: String,
    /// Page the user is sent to for authorization
    pub authorize_url: String,
}

impl Default for LinkedInEndpoints {
    fn default() -> Self {
        Self {
            oauth_base_url: "https://api.linkedin.com/uas/oauth".to_string(),
            api_base_url: "https://api.linkedin.com/v1".to_string(),
            authorize_url: "https://www.linkedin.com/uas/oauth/authenticate".to_string(),
        }
    }
}

impl LinkedInEndpoints {
    /// Point the token endpoints and the API at other hosts (staging, tests).
    pub fn with_base_urls(oauth_base_url: &str, api_base_url: &str) -> Self {
        Self {
            oauth_base_url: oauth_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn request_token_url(&self) -> String {
        format!("{}/requestToken", self.oauth_base_url)
    }

    pub fn access_token_url(&self) -> String {
        format!("{}/accessToken", self.oauth_base_url)
    }

    /// Authorization page for a request token; the token is the last component.
    pub fn authorization_url(&self, request_token: &str) -> String {
        format!(
            "{}?oauth_token={}",
            self.authorize_url,
            urlencoding::encode(request_token)
        )
    }

    pub fn profile_url(&self) -> String {
        format!("{}/people/{}", self.api_base_url, PROFILE_FIELDS)
    }

    pub fn connections_url(&self) -> String {
        format!("{}/people/{}", self.api_base_url, CONNECTION_FIELDS)
    }

    pub fn updates_url(&self) -> String {
        format!("{}/people/~/network/updates", self.api_base_url)
    }

    pub fn shares_url(&self) -> String {
        format!("{}/people/~/shares", self.api_base_url)
    }

    /// reqwest-backed OAuth1 client for these endpoints.
    pub fn client(&self, credentials: &Credentials) -> HttpOAuth1Client {
        HttpOAuth1Client::new(
            credentials,
            self.request_token_url(),
            self.access_token_url(),
        )
    }
}

/// LinkedIn adapter for one session.
///
/// Tokens live in the session's [`TokenStore`]; the adapter only keeps the
/// access token it is currently signing with.
pub struct LinkedInProvider<S: TokenStore> {
    client: Arc<dyn OAuth1Client>,
    store: S,
    endpoints: LinkedInEndpoints,
    access_token: Option<TokenPair>,
}

impl<S: TokenStore> LinkedInProvider<S> {
    /// Create an adapter with the reqwest-backed OAuth1 client.
    pub fn initialize(
        credentials: Credentials,
        endpoints: LinkedInEndpoints,
        store: S,
    ) -> Result<Self, ProviderError> {
        if !credentials.is_complete() {
            return Err(ProviderError::Configuration);
        }
        let client = Arc::new(endpoints.client(&credentials));
        Self::with_client(credentials, endpoints, client, store)
    }

    /// Create an adapter around an existing OAuth1 client.
    ///
    /// A previously stored access token is picked up so the adapter is
    /// immediately authenticated.
    pub fn with_client(
        credentials: Credentials,
        endpoints: LinkedInEndpoints,
        client: Arc<dyn OAuth1Client>,
        store: S,
    ) -> Result<Self, ProviderError> {
        if !credentials.is_complete() {
            return Err(ProviderError::Configuration);
        }

        let access_token = stored_access_token(&store);
        Ok(Self {
            client,
            store,
            endpoints,
            access_token,
        })
    }

    pub fn endpoints(&self) -> &LinkedInEndpoints {
        &self.endpoints
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access token the adapter signs API calls with, if any.
    pub fn access_token(&self) -> Option<&TokenPair> {
        self.access_token.as_ref()
    }

    // ─── Login ───────────────────────────────────────────────────────────────

    /// Start the login: obtain a request token and return the URL the user
    /// must be redirected to.
    pub async fn begin_login(&self) -> Result<String, ProviderError> {
        let response = self.client.retrieve_request_token().await.map_err(|e| {
            tracing::error!(error = %e, "Request token retrieval failed");
            ProviderError::Authentication(format!("{} returned an error: {}", PROVIDER_ID, e))
        })?;

        let body = match response {
            ProviderResponse::Success { body, .. } => body,
            ProviderResponse::Failure(failure) => return Err(login_failure(&failure)),
        };

        let fields = parse_form(&body);
        if fields
            .get("oauth_callback_confirmed")
            .is_some_and(|confirmed| confirmed != "true")
        {
            tracing::warn!("LinkedIn did not confirm the callback URL");
            return Err(ProviderError::InvalidToken);
        }
        let request_token = TokenPair::from_fields(&fields).ok_or(ProviderError::InvalidToken)?;

        self.store.set(keys::OAUTH_TOKEN, &request_token.token);
        self.store
            .set(keys::OAUTH_TOKEN_SECRET, &request_token.secret);

        tracing::info!(
            provider = PROVIDER_ID,
            "Request token issued, redirecting user for authorization"
        );

        Ok(self.endpoints.authorization_url(&request_token.token))
    }

    /// Finish the login with the parameters LinkedIn appended to the
    /// callback URL.
    pub async fn finish_login(
        &mut self,
        oauth_token: &str,
        oauth_verifier: Option<&str>,
    ) -> Result<(), ProviderError> {
        let verifier = oauth_verifier
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ProviderError::Authentication(format!(
                    "{} returned an invalid oauth_verifier",
                    PROVIDER_ID
                ))
            })?;

        let request_token = TokenPair::new(
            oauth_token,
            self.store
                .get(keys::OAUTH_TOKEN_SECRET)
                .unwrap_or_default(),
        );

        let invalid_access_token = || {
            ProviderError::Authentication(format!(
                "{} returned an invalid access_token",
                PROVIDER_ID
            ))
        };

        let response = self
            .client
            .retrieve_access_token(&request_token, verifier)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Access token exchange failed");
                ProviderError::Authentication(format!("{} returned an error: {}", PROVIDER_ID, e))
            })?;

        let payload = match response {
            ProviderResponse::Success { body, .. } => body,
            ProviderResponse::Failure(failure) => {
                tracing::warn!(
                    status = failure.status,
                    problem = ?failure.problem,
                    "LinkedIn rejected the access token exchange"
                );
                return Err(invalid_access_token());
            }
        };
        let access_token = TokenPair::from_form(&payload).ok_or_else(invalid_access_token)?;

        self.store.delete(keys::OAUTH_TOKEN);
        self.store.delete(keys::OAUTH_TOKEN_SECRET);

        self.store.set(keys::ACCESS_TOKEN_PAYLOAD, payload.trim());
        self.store.set(keys::ACCESS_TOKEN, &access_token.token);
        self.store
            .set(keys::ACCESS_TOKEN_SECRET, &access_token.secret);
        self.store.set(keys::IS_LOGGED_IN, "1");
        self.access_token = Some(access_token);

        tracing::info!(provider = PROVIDER_ID, "User connected");
        Ok(())
    }

    /// Whether the session completed the login.
    pub fn is_user_connected(&self) -> bool {
        self.store.get(keys::IS_LOGGED_IN).as_deref() == Some("1")
    }

    /// Forget every token of this session.
    pub fn logout(&mut self) {
        for key in keys::ALL {
            self.store.delete(key);
        }
        self.access_token = None;
        tracing::info!(provider = PROVIDER_ID, "User disconnected");
    }

    // ─── API ─────────────────────────────────────────────────────────────────

    /// Load the connected user's profile.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ProviderError> {
        let access_token = self.access_token.as_ref().ok_or_else(|| {
            ProviderError::ProfileFetch("the user is not connected".to_string())
        })?;

        let request = ApiRequest::get(self.endpoints.profile_url());
        let response = self
            .client
            .call(&request, access_token)
            .await
            .map_err(|e| {
                ProviderError::ProfileFetch(format!("{} returned an error: {}", PROVIDER_ID, e))
            })?;

        let body = match response {
            ProviderResponse::Success { body, .. } => body,
            ProviderResponse::Failure(failure) => {
                return Err(ProviderError::ProfileFetch(format!(
                    "{} returned an invalid response: {}",
                    PROVIDER_ID,
                    failure_message(&failure)
                )))
            }
        };

        linkedin_xml::parse_profile(&body).map_err(|e| {
            ProviderError::ProfileFetch(format!("{} returned an invalid data: {}", PROVIDER_ID, e))
        })
    }

    /// Load the user's connections. Any failure yields an empty list.
    pub async fn fetch_contacts(&self) -> Vec<UserContact> {
        let request = ApiRequest::get(self.endpoints.connections_url());
        let Some(body) = self.best_effort_call(&request, "contacts").await else {
            return Vec::new();
        };

        linkedin_xml::parse_connections(&body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unreadable LinkedIn connections payload");
            Vec::new()
        })
    }

    /// Publish a status update.
    pub async fn post_status(
        &self,
        status: impl Into<StatusUpdate>,
    ) -> Result<PostedStatus, ProviderError> {
        let status = status.into();
        let access_token = self.access_token.as_ref().ok_or_else(|| {
            ProviderError::StatusUpdate("the user is not connected".to_string())
        })?;

        let body = serde_json::to_value(status.to_share_request()).map_err(|e| {
            ProviderError::StatusUpdate(format!("could not encode the share: {}", e))
        })?;
        let request = ApiRequest::post(self.endpoints.shares_url()).with_json(body);

        let response = self
            .client
            .call(&request, access_token)
            .await
            .map_err(|e| {
                ProviderError::StatusUpdate(format!("{} returned an error: {}", PROVIDER_ID, e))
            })?;

        match response {
            ProviderResponse::Success { body, .. } => {
                tracing::info!(private = status.is_private(), "Status update posted");
                Ok(PostedStatus::from_body(&body))
            }
            ProviderResponse::Failure(failure) => Err(ProviderError::StatusUpdate(format!(
                "{} returned an error: {}",
                PROVIDER_ID,
                failure_message(&failure)
            ))),
        }
    }

    /// Load recent shares: the user's own for `"me"`, the network
    /// timeline otherwise. Any failure yields an empty list.
    pub async fn fetch_activity(&self, stream: &str) -> Vec<UserActivity> {
        let scope = ActivityScope::parse(stream);
        let request = ApiRequest::get(self.endpoints.updates_url()).with_query(scope.query());
        let Some(body) = self.best_effort_call(&request, "activity").await else {
            return Vec::new();
        };

        linkedin_xml::parse_updates(&body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unreadable LinkedIn updates payload");
            Vec::new()
        })
    }

    /// Signed call whose failure is logged rather than reported.
    async fn best_effort_call(&self, request: &ApiRequest, what: &str) -> Option<String> {
        let Some(access_token) = self.access_token.as_ref() else {
            tracing::warn!(what, "Skipping LinkedIn request, user is not connected");
            return None;
        };

        match self.client.call(request, access_token).await {
            Ok(ProviderResponse::Success { body, .. }) => Some(body),
            Ok(ProviderResponse::Failure(failure)) => {
                tracing::warn!(
                    what,
                    status = failure.status,
                    message = %failure_message(&failure),
                    "LinkedIn request unsuccessful"
                );
                None
            }
            Err(e) => {
                tracing::warn!(what, error = %e, "LinkedIn request failed");
                None
            }
        }
    }
}

/// Access token saved by an earlier login, if any.
fn stored_access_token<S: TokenStore>(store: &S) -> Option<TokenPair> {
    store
        .get(keys::ACCESS_TOKEN_PAYLOAD)
        .and_then(|payload| TokenPair::from_form(&payload))
        .or_else(|| {
            Some(TokenPair::new(
                store.get(keys::ACCESS_TOKEN)?,
                store.get(keys::ACCESS_TOKEN_SECRET)?,
            ))
        })
}

/// Error for a failed request token call.
fn login_failure(failure: &ProviderFailure) -> ProviderError {
    match failure.problem.as_deref() {
        Some("timestamp_refused") => {
            let raw = failure
                .acceptable_timestamps
                .as_deref()
                .filter(|raw| !raw.trim().is_empty())
                .unwrap_or("unknown");
            let acceptable = format_acceptable_timestamp(raw).unwrap_or_else(|| raw.to_string());
            tracing::error!(acceptable = %acceptable, "LinkedIn refused our timestamp");
            ProviderError::ClockSkew { acceptable }
        }
        Some(problem) => {
            tracing::error!(problem, "LinkedIn returned an oauth_problem");
            ProviderError::Authentication(format!(
                "{} returned an oauth_problem: {}",
                PROVIDER_ID, problem
            ))
        }
        None => ProviderError::InvalidToken,
    }
}

/// Short description of a failed API call.
fn failure_message(failure: &ProviderFailure) -> String {
    linkedin_xml::api_error_message(&failure.detail)
        .or_else(|| failure.problem.clone())
        .unwrap_or_else(|| format!("HTTP {}", failure.status))
}
