// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth 1.0a client for LinkedIn.
//!
//! Handles:
//! - HMAC-SHA1 request signing (RFC 5849 section 3.4)
//! - Request token and access token retrieval
//! - Signed API calls with an access token
//!
//! Every call resolves to a [`ProviderResponse`]; only transport problems are
//! reported as errors.

use crate::models::{Credentials, TokenPair};
use crate::time_utils::unix_now;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{header, Method};
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};
use std::collections::HashMap;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Failure to reach the provider at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to generate OAuth nonce")]
    Nonce,
}

/// A signed API request, described independently of the HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    /// Query parameters (part of the signature)
    pub query: Vec<(String, String)>,
    /// JSON body (not part of the signature)
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            ..Self::get(url)
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of a query parameter, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// URL with the query string percent-encoded the same way it is signed.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.url, query)
    }
}

/// Outcome of a call to LinkedIn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResponse {
    /// 2xx response with its raw body.
    Success { status: u16, body: String },
    /// Anything else, with the provider's problem report if there was one.
    Failure(ProviderFailure),
}

impl ProviderResponse {
    pub fn from_http(status: u16, body: String) -> Self {
        if (200..300).contains(&status) {
            ProviderResponse::Success { status, body }
        } else {
            ProviderResponse::Failure(ProviderFailure::from_body(status, body))
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderResponse::Success { .. })
    }
}

/// Non-success response from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub status: u16,
    /// `oauth_problem` reported by the OAuth endpoints
    pub problem: Option<String>,
    /// `oauth_acceptable_timestamps`, sent with `timestamp_refused`
    pub acceptable_timestamps: Option<String>,
    /// Raw response body
    pub detail: String,
}

impl ProviderFailure {
    /// Decode a failed response. OAuth endpoints report problems as
    /// form-encoded fields; API errors come back as XML and only keep the body.
    pub fn from_body(status: u16, body: impl Into<String>) -> Self {
        let detail = body.into();
        let mut fields = parse_form(&detail);
        Self {
            status,
            problem: fields.remove("oauth_problem"),
            acceptable_timestamps: fields.remove("oauth_acceptable_timestamps"),
            detail,
        }
    }
}

/// OAuth1 operations the LinkedIn provider depends on.
#[async_trait]
pub trait OAuth1Client: Send + Sync {
    /// Obtain a temporary request token (first leg).
    async fn retrieve_request_token(&self) -> Result<ProviderResponse, TransportError>;

    /// Exchange an authorized request token and verifier for an access token.
    async fn retrieve_access_token(
        &self,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<ProviderResponse, TransportError>;

    /// Send a request signed with the user's access token.
    async fn call(
        &self,
        request: &ApiRequest,
        access_token: &TokenPair,
    ) -> Result<ProviderResponse, TransportError>;
}

/// Percent-encode per RFC 3986, leaving only unreserved characters.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Decode an `application/x-www-form-urlencoded` body.
pub fn parse_form(body: &str) -> HashMap<String, String> {
    body.trim()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((form_decode(key)?, form_decode(value)?))
        })
        .collect()
}

fn form_decode(value: &str) -> Option<String> {
    urlencoding::decode(&value.replace('+', " "))
        .ok()
        .map(|v| v.into_owned())
}

/// Signature base string: method, base URL and normalized parameters.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&normalized)
    )
}

/// Signs requests on behalf of one consumer (application).
#[derive(Clone)]
pub struct Signer {
    consumer_key: String,
    consumer_secret: String,
}

impl Signer {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// HMAC-SHA1 signature of a base string, base64-encoded.
    pub fn sign(&self, base_string: &str, token_secret: &str) -> String {
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(token_secret)
        );
        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes());
        BASE64.encode(hmac::sign(&key, base_string.as_bytes()).as_ref())
    }

    /// Build the `Authorization: OAuth ...` header value.
    ///
    /// `extra` carries leg-specific protocol parameters such as
    /// `oauth_callback` or `oauth_verifier`.
    #[allow(clippy::too_many_arguments)]
    pub fn authorization_header(
        &self,
        method: &Method,
        url: &str,
        query: &[(String, String)],
        token: Option<&TokenPair>,
        extra: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let mut oauth: Vec<(String, String)> = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            (
                "oauth_signature_method".to_string(),
                SIGNATURE_METHOD.to_string(),
            ),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];
        if let Some(token) = token {
            oauth.push(("oauth_token".to_string(), token.token.clone()));
        }
        oauth.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let mut signed: Vec<(String, String)> = query.to_vec();
        signed.extend(oauth.iter().cloned());
        let base_string = signature_base_string(method.as_str(), url, &signed);
        let token_secret = token.map(|t| t.secret.as_str()).unwrap_or_default();
        oauth.push((
            "oauth_signature".to_string(),
            self.sign(&base_string, token_secret),
        ));
        oauth.sort();

        let params = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {}", params)
    }
}

/// Random hex nonce, unique per request.
fn generate_nonce(rng: &SystemRandom) -> Result<String, TransportError> {
    let mut buf = [0u8; 16];
    rng.fill(&mut buf).map_err(|_| TransportError::Nonce)?;
    Ok(hex::encode(buf))
}

/// OAuth1 client backed by reqwest.
#[derive(Clone)]
pub struct HttpOAuth1Client {
    http: reqwest::Client,
    signer: Signer,
    callback_url: String,
    request_token_url: String,
    access_token_url: String,
    rng: SystemRandom,
}

impl HttpOAuth1Client {
    /// Create a client for the given application credentials and token
    /// endpoints.
    pub fn new(
        credentials: &Credentials,
        request_token_url: impl Into<String>,
        access_token_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            signer: Signer::new(&credentials.app_key, &credentials.app_secret),
            callback_url: credentials.callback_url.clone(),
            request_token_url: request_token_url.into(),
            access_token_url: access_token_url.into(),
            rng: SystemRandom::new(),
        }
    }

    async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&TokenPair>,
        extra: &[(&str, &str)],
    ) -> Result<ProviderResponse, TransportError> {
        let nonce = generate_nonce(&self.rng)?;
        let authorization = self.signer.authorization_header(
            &request.method,
            &request.url,
            &request.query,
            token,
            extra,
            &nonce,
            unix_now(),
        );

        let mut builder = self
            .http
            .request(request.method.clone(), request.full_url())
            .header(header::AUTHORIZATION, authorization);
        if let Some(body) = &request.body {
            builder = builder.header("x-li-format", "json").json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = ProviderResponse::from_http(status, body);
        if let ProviderResponse::Failure(failure) = &result {
            tracing::warn!(
                status,
                url = %request.url,
                problem = ?failure.problem,
                "LinkedIn request failed"
            );
        }
        Ok(result)
    }
}

#[async_trait]
impl OAuth1Client for HttpOAuth1Client {
    async fn retrieve_request_token(&self) -> Result<ProviderResponse, TransportError> {
        let request = ApiRequest::post(&self.request_token_url);
        self.send(&request, None, &[("oauth_callback", self.callback_url.as_str())])
            .await
    }

    async fn retrieve_access_token(
        &self,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<ProviderResponse, TransportError> {
        let request = ApiRequest::post(&self.access_token_url);
        self.send(&request, Some(request_token), &[("oauth_verifier", verifier)])
            .await
    }

    async fn call(
        &self,
        request: &ApiRequest,
        access_token: &TokenPair,
    ) -> Result<ProviderResponse, TransportError> {
        self.send(request, Some(access_token), &[]).await
    }
}
