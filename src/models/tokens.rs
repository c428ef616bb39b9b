// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application credentials and OAuth1 token pairs.

use std::collections::HashMap;
use std::fmt;

/// Names of the entries the provider keeps in the token store.
pub mod keys {
    /// Temporary request token issued at the start of the handshake.
    pub const OAUTH_TOKEN: &str = "oauth_token";
    pub const OAUTH_TOKEN_SECRET: &str = "oauth_token_secret";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const ACCESS_TOKEN_SECRET: &str = "access_token_secret";
    /// Full form-encoded access token payload as returned by LinkedIn.
    pub const ACCESS_TOKEN_PAYLOAD: &str = "access_token_linkedin";
    /// Set to `"1"` once the handshake completed.
    pub const IS_LOGGED_IN: &str = "is_logged_in";

    /// Every key the provider may write, for logout.
    pub const ALL: [&str; 6] = [
        OAUTH_TOKEN,
        OAUTH_TOKEN_SECRET,
        ACCESS_TOKEN,
        ACCESS_TOKEN_SECRET,
        ACCESS_TOKEN_PAYLOAD,
        IS_LOGGED_IN,
    ];
}

/// LinkedIn application credentials plus the OAuth callback URL.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub app_key: String,
    pub app_secret: String,
    pub callback_url: String,
}

impl Credentials {
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            callback_url: callback_url.into(),
        }
    }

    /// Both the application key and secret are set.
    pub fn is_complete(&self) -> bool {
        !self.app_key.trim().is_empty() && !self.app_secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// An OAuth1 token and its secret (request or access token).
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

impl TokenPair {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Read `oauth_token` / `oauth_token_secret` from decoded form fields.
    ///
    /// An empty token is treated as missing; the secret may be empty.
    pub fn from_fields(fields: &HashMap<String, String>) -> Option<Self> {
        let token = fields.get("oauth_token").filter(|t| !t.is_empty())?;
        let secret = fields.get("oauth_token_secret")?;
        Some(Self::new(token.as_str(), secret.as_str()))
    }

    /// Parse a form-encoded token response body.
    pub fn from_form(body: &str) -> Option<Self> {
        Self::from_fields(&crate::services::oauth1::parse_form(body))
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_completeness() {
        assert!(Credentials::new("key", "secret", "http://cb").is_complete());
        assert!(!Credentials::new("", "secret", "http://cb").is_complete());
        assert!(!Credentials::new("key", "  ", "http://cb").is_complete());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("key", "super-secret", "http://cb");
        let pair = TokenPair::new("tok", "tok-secret");

        assert!(!format!("{:?}", creds).contains("super-secret"));
        assert!(!format!("{:?}", pair).contains("tok-secret"));
    }

    #[test]
    fn test_token_pair_from_form() {
        let pair = TokenPair::from_form(
            "oauth_token=abc&oauth_token_secret=def&oauth_expires_in=5183999",
        )
        .expect("pair");
        assert_eq!(pair, TokenPair::new("abc", "def"));

        assert!(TokenPair::from_form("oauth_token_secret=def").is_none());
        assert!(TokenPair::from_form("oauth_token=&oauth_token_secret=def").is_none());
    }
}
