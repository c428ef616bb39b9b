// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::models::Credentials;
use crate::services::linkedin::LinkedInEndpoints;
use crate::services::token_store::{DEFAULT_MAX_PENDING, DEFAULT_PENDING_TTL};
use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// LinkedIn application (consumer) key
    pub linkedin_app_key: String,
    /// URL LinkedIn sends the user back to after authorization
    pub linkedin_callback_url: String,
    /// Frontend URL for post-login redirects
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Override for the v1 API base URL
    pub linkedin_api_base_url: Option<String>,
    /// Override for the OAuth token endpoints base URL
    pub linkedin_oauth_base_url: Option<String>,
    /// How long an unfinished login keeps its session
    pub pending_session_ttl: Duration,
    /// Upper bound on sessions waiting for a login to finish
    pub max_pending_sessions: usize,

    // --- Secrets ---
    /// LinkedIn application (consumer) secret
    pub linkedin_app_secret: String,
    /// HMAC key for session cookies (raw bytes)
    pub session_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            linkedin_app_key: "test_app_key".to_string(),
            linkedin_callback_url: "http://localhost:8080/auth/linkedin/callback".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            linkedin_api_base_url: None,
            linkedin_oauth_base_url: None,
            pending_session_ttl: DEFAULT_PENDING_TTL,
            max_pending_sessions: DEFAULT_MAX_PENDING,
            linkedin_app_secret: "test_app_secret".to_string(),
            session_signing_key: b"test_session_key_32_bytes_min!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            linkedin_app_key: env::var("LINKEDIN_APP_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("LINKEDIN_APP_KEY"))?,
            linkedin_callback_url: env::var("LINKEDIN_CALLBACK_URL")
                .unwrap_or_else(|_| "http://localhost:8080/auth/linkedin/callback".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            linkedin_api_base_url: optional_var("LINKEDIN_API_BASE_URL"),
            linkedin_oauth_base_url: optional_var("LINKEDIN_OAUTH_BASE_URL"),
            pending_session_ttl: optional_var("PENDING_SESSION_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_PENDING_TTL),
            max_pending_sessions: optional_var("MAX_PENDING_SESSIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_PENDING),

            linkedin_app_secret: env::var("LINKEDIN_APP_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("LINKEDIN_APP_SECRET"))?,
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Application credentials handed to the LinkedIn provider.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            &self.linkedin_app_key,
            &self.linkedin_app_secret,
            &self.linkedin_callback_url,
        )
    }

    /// LinkedIn endpoints, with any base URL overrides applied.
    pub fn endpoints(&self) -> LinkedInEndpoints {
        let defaults = LinkedInEndpoints::default();
        if self.linkedin_api_base_url.is_none() && self.linkedin_oauth_base_url.is_none() {
            return defaults;
        }
        LinkedInEndpoints::with_base_urls(
            self.linkedin_oauth_base_url
                .as_deref()
                .unwrap_or(&defaults.oauth_base_url),
            self.linkedin_api_base_url
                .as_deref()
                .unwrap_or(&defaults.api_base_url),
        )
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("LINKEDIN_APP_KEY", " test_key ");
        env::set_var("LINKEDIN_APP_SECRET", "test_secret");
        env::set_var("SESSION_SIGNING_KEY", "test_session_key_32_bytes_min!!");
        env::set_var("LINKEDIN_API_BASE_URL", "http://127.0.0.1:9999/v1");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.linkedin_app_key, "test_key");
        assert_eq!(config.linkedin_app_secret, "test_secret");
        assert_eq!(config.port, 8080);

        let endpoints = config.endpoints();
        assert_eq!(
            endpoints.profile_url(),
            format!(
                "http://127.0.0.1:9999/v1/people/{}",
                LinkedInEndpoints::default()
                    .profile_url()
                    .trim_start_matches("https://api.linkedin.com/v1/people/")
            )
        );
        assert_eq!(
            endpoints.request_token_url(),
            "https://api.linkedin.com/uas/oauth/requestToken"
        );
    }

    #[test]
    fn test_default_config_is_complete() {
        let config = Config::default();
        assert!(config.credentials().is_complete());
        assert_eq!(config.endpoints(), LinkedInEndpoints::default());
    }
}
