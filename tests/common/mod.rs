// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use linkedin_connect::config::Config;
use linkedin_connect::middleware::session::sign_session_id;
use linkedin_connect::models::tokens::keys;
use linkedin_connect::models::{Credentials, TokenPair};
use linkedin_connect::routes::create_router;
use linkedin_connect::services::{
    ApiRequest, LinkedInEndpoints, LinkedInProvider, MemoryTokenStore, OAuth1Client,
    ProviderResponse, TokenStore, TransportError, PROVIDER_ID,
};
use linkedin_connect::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const PROFILE_XML: &str = include_str!("../fixtures/profile.xml");
#[allow(dead_code)]
pub const CONNECTIONS_XML: &str = include_str!("../fixtures/connections.xml");
#[allow(dead_code)]
pub const UPDATES_XML: &str = include_str!("../fixtures/updates.xml");

/// Scripted outcome of one OAuth1 operation.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Reply {
    Respond(ProviderResponse),
    /// The provider could not be reached
    Unreachable,
}

impl Reply {
    fn into_result(self) -> Result<ProviderResponse, TransportError> {
        match self {
            Reply::Respond(response) => Ok(response),
            Reply::Unreachable => Err(TransportError::Nonce),
        }
    }
}

/// 200 response with the given body.
#[allow(dead_code)]
pub fn success(body: &str) -> Reply {
    Reply::Respond(ProviderResponse::from_http(200, body.to_string()))
}

/// Non-success response with the given status and body.
#[allow(dead_code)]
pub fn failure(status: u16, body: &str) -> Reply {
    Reply::Respond(ProviderResponse::from_http(status, body.to_string()))
}

/// One call received by the scripted client.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Recorded {
    RequestToken,
    AccessToken {
        request_token: TokenPair,
        verifier: String,
    },
    Call {
        request: ApiRequest,
        access_token: TokenPair,
    },
}

/// OAuth1 client that replays scripted replies and records every call.
///
/// Unscripted calls get a 404.
#[derive(Default)]
pub struct ScriptedClient {
    request_token: Mutex<Option<Reply>>,
    access_token: Mutex<Option<Reply>>,
    calls: Mutex<HashMap<String, Reply>>,
    recorded: Mutex<Vec<Recorded>>,
}

#[allow(dead_code)]
impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on_request_token(&self, reply: Reply) {
        *self.request_token.lock().unwrap() = Some(reply);
    }

    pub fn on_access_token(&self, reply: Reply) {
        *self.access_token.lock().unwrap() = Some(reply);
    }

    /// Script the reply for API calls to `url` (without query string).
    pub fn on_call(&self, url: &str, reply: Reply) {
        self.calls.lock().unwrap().insert(url.to_string(), reply);
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    /// API requests received so far.
    pub fn api_requests(&self) -> Vec<ApiRequest> {
        self.recorded()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Call { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    fn not_found() -> Reply {
        failure(404, "")
    }
}

#[async_trait]
impl OAuth1Client for ScriptedClient {
    async fn retrieve_request_token(&self) -> Result<ProviderResponse, TransportError> {
        self.recorded.lock().unwrap().push(Recorded::RequestToken);
        let reply = self.request_token.lock().unwrap().clone();
        reply.unwrap_or_else(Self::not_found).into_result()
    }

    async fn retrieve_access_token(
        &self,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<ProviderResponse, TransportError> {
        self.recorded.lock().unwrap().push(Recorded::AccessToken {
            request_token: request_token.clone(),
            verifier: verifier.to_string(),
        });
        let reply = self.access_token.lock().unwrap().clone();
        reply.unwrap_or_else(Self::not_found).into_result()
    }

    async fn call(
        &self,
        request: &ApiRequest,
        access_token: &TokenPair,
    ) -> Result<ProviderResponse, TransportError> {
        self.recorded.lock().unwrap().push(Recorded::Call {
            request: request.clone(),
            access_token: access_token.clone(),
        });
        let reply = self.calls.lock().unwrap().get(&request.url).cloned();
        reply.unwrap_or_else(Self::not_found).into_result()
    }
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Config::default().credentials()
}

/// Provider over a fresh in-memory store and the given client.
#[allow(dead_code)]
pub fn test_provider(
    client: Arc<ScriptedClient>,
) -> (LinkedInProvider<MemoryTokenStore>, MemoryTokenStore) {
    let store = MemoryTokenStore::new();
    let provider = LinkedInProvider::with_client(
        test_credentials(),
        LinkedInEndpoints::default(),
        client,
        store.clone(),
    )
    .expect("test credentials are complete");
    (provider, store)
}

/// Provider that already holds an access token.
#[allow(dead_code)]
pub fn connected_provider(
    client: Arc<ScriptedClient>,
) -> (LinkedInProvider<MemoryTokenStore>, MemoryTokenStore) {
    let store = MemoryTokenStore::new();
    store.set(
        keys::ACCESS_TOKEN_PAYLOAD,
        "oauth_token=access-token&oauth_token_secret=access-secret",
    );
    store.set(keys::IS_LOGGED_IN, "1");
    let provider = LinkedInProvider::with_client(
        test_credentials(),
        LinkedInEndpoints::default(),
        client,
        store.clone(),
    )
    .expect("test credentials are complete");
    (provider, store)
}

/// Create a test app around a scripted OAuth1 client.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(client: Arc<ScriptedClient>) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(client, Config::default())
}

/// Like [`create_test_app`], with a custom configuration.
#[allow(dead_code)]
pub fn create_test_app_with_config(
    client: Arc<ScriptedClient>,
    config: Config,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::with_client(config, client));
    (create_router(state.clone()), state)
}

/// `Cookie` header for a session that never logged in.
#[allow(dead_code)]
pub fn session_cookie_header(state: &AppState, session_id: &str) -> String {
    let value = sign_session_id(session_id, &state.config.session_signing_key).unwrap();
    format!("li_session={}", value)
}

/// `Cookie` header for a session connected to LinkedIn.
#[allow(dead_code)]
pub fn connected_cookie_header(state: &AppState, session_id: &str) -> String {
    let tokens = state.sessions.tokens(session_id, PROVIDER_ID);
    tokens.set(
        keys::ACCESS_TOKEN_PAYLOAD,
        "oauth_token=access-token&oauth_token_secret=access-secret",
    );
    tokens.set(keys::ACCESS_TOKEN, "access-token");
    tokens.set(keys::ACCESS_TOKEN_SECRET, "access-secret");
    tokens.set(keys::IS_LOGGED_IN, "1");
    session_cookie_header(state, session_id)
}
