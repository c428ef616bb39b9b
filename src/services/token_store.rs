// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-scoped storage for OAuth tokens.

use crate::models::tokens::keys;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Named string values tied to the current session.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// Standalone in-memory store, for tests and single-user tools.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    tokens: Arc<DashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.tokens.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.tokens.insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.tokens.remove(key);
    }
}

/// How long a session may sit on a request token before it is dropped.
pub const DEFAULT_PENDING_TTL: Duration = Duration::from_secs(600);

/// Most sessions that may be waiting on a login at once.
pub const DEFAULT_MAX_PENDING: usize = 10_000;

struct SessionEntry {
    values: HashMap<String, String>,
    created_at: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            values: HashMap::new(),
            created_at: Instant::now(),
        }
    }

    /// Whether any provider completed its login in this session.
    fn is_connected(&self) -> bool {
        self.values
            .iter()
            .any(|(key, value)| key.ends_with(keys::IS_LOGGED_IN) && value == "1")
    }
}

struct Sessions {
    entries: DashMap<String, SessionEntry>,
    pending_ttl: Duration,
    max_pending: usize,
}

/// Tokens of all sessions, keyed by session ID.
///
/// Shared across requests; hand out per-session views with [`Self::tokens`].
/// Sessions that never finish a login expire after the pending TTL, and at
/// most `max_pending` of them are kept (oldest dropped first).
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Sessions>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_PENDING_TTL, DEFAULT_MAX_PENDING)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(pending_ttl: Duration, max_pending: usize) -> Self {
        Self {
            sessions: Arc::new(Sessions {
                entries: DashMap::new(),
                pending_ttl,
                max_pending,
            }),
        }
    }

    /// View of one session's tokens, namespaced by provider.
    pub fn tokens(&self, session_id: &str, provider: &str) -> SessionTokens {
        SessionTokens {
            sessions: Arc::clone(&self.sessions),
            session_id: session_id.to_string(),
            prefix: format!("{}.token.", provider.to_ascii_lowercase()),
        }
    }

    /// Number of sessions holding at least one token.
    pub fn session_count(&self) -> usize {
        self.sessions.entries.len()
    }

    /// Drop everything stored for a session.
    pub fn remove_session(&self, session_id: &str) {
        self.sessions.entries.remove(session_id);
    }
}

impl Sessions {
    /// Drop expired pending sessions, then the oldest ones until `room` more
    /// fit under the cap.
    fn prune(&self, room: usize) {
        let ttl = self.pending_ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.is_connected() || entry.created_at.elapsed() < ttl);

        let mut pending: Vec<(Instant, String)> = self
            .entries
            .iter()
            .filter(|entry| !entry.is_connected())
            .map(|entry| (entry.created_at, entry.key().clone()))
            .collect();
        let limit = self.max_pending.saturating_sub(room);
        if pending.len() > limit {
            pending.sort();
            let excess = pending.len() - limit;
            for (_, id) in pending.into_iter().take(excess) {
                self.entries.remove(&id);
            }
        }

        let dropped = before.saturating_sub(self.entries.len());
        if dropped > 0 {
            tracing::debug!(dropped, "Pruned pending sessions");
        }
    }
}

/// One session's tokens for one provider.
#[derive(Clone)]
pub struct SessionTokens {
    sessions: Arc<Sessions>,
    session_id: String,
    prefix: String,
}

impl SessionTokens {
    fn scoped(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl TokenStore for SessionTokens {
    fn get(&self, key: &str) -> Option<String> {
        self.sessions
            .entries
            .get(&self.session_id)
            .and_then(|session| session.values.get(&self.scoped(key)).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        // No map guard may be held while pruning.
        if !self.sessions.entries.contains_key(&self.session_id) {
            self.sessions.prune(1);
        }
        self.sessions
            .entries
            .entry(self.session_id.clone())
            .or_insert_with(SessionEntry::new)
            .values
            .insert(self.scoped(key), value.to_string());
    }

    fn delete(&self, key: &str) {
        let now_empty = match self.sessions.entries.get_mut(&self.session_id) {
            Some(mut session) => {
                session.values.remove(&self.scoped(key));
                session.values.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.sessions
                .entries
                .remove_if(&self.session_id, |_, session| session.values.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        store.set("oauth_token", "abc");
        assert_eq!(store.get("oauth_token").as_deref(), Some("abc"));

        store.delete("oauth_token");
        assert_eq!(store.get("oauth_token"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let alice = store.tokens("session-a", "LinkedIn");
        let bob = store.tokens("session-b", "LinkedIn");

        alice.set("access_token", "alice-token");

        assert_eq!(alice.get("access_token").as_deref(), Some("alice-token"));
        assert_eq!(bob.get("access_token"), None);
    }

    #[test]
    fn test_providers_are_namespaced() {
        let store = SessionStore::new();
        store.tokens("s", "LinkedIn").set("access_token", "li");

        assert_eq!(store.tokens("s", "Twitter").get("access_token"), None);
        assert_eq!(
            store.tokens("s", "linkedin").get("access_token").as_deref(),
            Some("li")
        );
    }

    #[test]
    fn test_empty_sessions_are_dropped() {
        let store = SessionStore::new();
        let tokens = store.tokens("s", "LinkedIn");

        tokens.set("oauth_token", "t");
        assert_eq!(store.session_count(), 1);

        tokens.delete("oauth_token");
        assert_eq!(store.session_count(), 0);

        // Deleting from a missing session is a no-op.
        tokens.delete("oauth_token");
    }

    #[test]
    fn test_expired_pending_sessions_are_pruned() {
        let store = SessionStore::with_limits(Duration::ZERO, 100);

        let connected = store.tokens("connected", "LinkedIn");
        connected.set(keys::IS_LOGGED_IN, "1");
        store.tokens("abandoned", "LinkedIn").set("oauth_token", "t");

        // Opening another session sweeps the abandoned handshake.
        store.tokens("new", "LinkedIn").set("oauth_token", "t2");

        assert_eq!(store.session_count(), 2);
        assert_eq!(store.tokens("abandoned", "LinkedIn").get("oauth_token"), None);
        assert_eq!(connected.get(keys::IS_LOGGED_IN).as_deref(), Some("1"));
    }

    #[test]
    fn test_pending_sessions_are_capped() {
        let store = SessionStore::with_limits(DEFAULT_PENDING_TTL, 3);
        store.tokens("connected", "LinkedIn").set(keys::IS_LOGGED_IN, "1");

        for i in 0..10 {
            store
                .tokens(&format!("s{}", i), "LinkedIn")
                .set("oauth_token", "t");
        }

        // Three pending sessions plus the connected one.
        assert_eq!(store.session_count(), 4);
        assert_eq!(store.tokens("s0", "LinkedIn").get("oauth_token"), None);
        assert_eq!(
            store.tokens("s9", "LinkedIn").get("oauth_token").as_deref(),
            Some("t")
        );
    }

    #[test]
    fn test_existing_session_is_not_pruned_on_update() {
        let store = SessionStore::with_limits(Duration::ZERO, 100);
        let tokens = store.tokens("s", "LinkedIn");

        tokens.set("oauth_token", "t");
        tokens.set("oauth_token_secret", "s");

        assert_eq!(tokens.get("oauth_token").as_deref(), Some("t"));
    }
}
