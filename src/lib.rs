// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LinkedIn-Connect: sign users in with LinkedIn and act on their behalf
//!
//! This crate provides an OAuth 1.0a LinkedIn provider adapter (login,
//! profile, connections, network updates and shares) and a small HTTP
//! server that drives it for browser sessions.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use error::ProviderError;
use services::linkedin::{LinkedInEndpoints, LinkedInProvider, PROVIDER_ID};
use services::oauth1::OAuth1Client;
use services::token_store::{SessionStore, SessionTokens};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub endpoints: LinkedInEndpoints,
    pub sessions: SessionStore,
    /// OAuth1 client shared by every session's provider
    pub client: Arc<dyn OAuth1Client>,
}

impl AppState {
    /// State backed by the reqwest OAuth1 client for the configured endpoints.
    pub fn new(config: Config) -> Self {
        let endpoints = config.endpoints();
        let client = Arc::new(endpoints.client(&config.credentials()));
        Self::with_client(config, client)
    }

    /// State with an injected OAuth1 client.
    pub fn with_client(config: Config, client: Arc<dyn OAuth1Client>) -> Self {
        Self {
            endpoints: config.endpoints(),
            sessions: SessionStore::with_limits(
                config.pending_session_ttl,
                config.max_pending_sessions,
            ),
            config,
            client,
        }
    }

    /// LinkedIn provider bound to one session's tokens.
    pub fn provider_for(
        &self,
        session_id: &str,
    ) -> Result<LinkedInProvider<SessionTokens>, ProviderError> {
        LinkedInProvider::with_client(
            self.config.credentials(),
            self.endpoints.clone(),
            Arc::clone(&self.client),
            self.sessions.tokens(session_id, PROVIDER_ID),
        )
    }
}
