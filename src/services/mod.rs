// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - provider and transport layer.

pub mod linkedin;
pub mod linkedin_xml;
pub mod oauth1;
pub mod token_store;

pub use linkedin::{LinkedInEndpoints, LinkedInProvider, PROVIDER_ID};
pub use oauth1::{
    ApiRequest, HttpOAuth1Client, OAuth1Client, ProviderFailure, ProviderResponse, TransportError,
};
pub use token_store::{MemoryTokenStore, SessionStore, SessionTokens, TokenStore};
