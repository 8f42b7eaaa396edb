//! Session token store
//!
//! Per-session token/value mappings and per-category counters, shared by the
//! redaction engine across all sessions. Session state is created lazily on
//! first token mint and lives until the session is cleared.
//!
//! Concurrency: the store is safe under concurrent `redact` calls for the
//! same session. The reverse lookup and the mint run under the session
//! entry's lock, so two racing calls can never mint two tokens for one value
//! or skip a counter increment.

use dashmap::DashMap;
use std::collections::BTreeMap;

/// Redaction state for one session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// token -> original value
    tokens: BTreeMap<String, String>,

    /// category label -> last minted suffix
    counters: BTreeMap<String, u64>,
}

impl SessionState {
    /// Reverse lookup: existing token for an exact original value
    fn token_for_value(&self, value: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|(_, v)| v.as_str() == value)
            .map(|(token, _)| token.as_str())
    }

    /// Mint the next token for a category and record the mapping
    fn mint(&mut self, label: &str, value: &str) -> String {
        let counter = self.counters.entry(label.to_string()).or_insert(0);
        *counter += 1;

        let token = format!("{}_{}", label, counter);
        self.tokens.insert(token.clone(), value.to_string());
        token
    }
}

/// Concurrent map of session id -> redaction state
#[derive(Debug, Default)]
pub struct SessionTokenStore {
    sessions: DashMap<String, SessionState>,
}

impl SessionTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing token for `value` in this session, or mint a new
    /// `LABEL_N` token with the next per-category counter
    ///
    /// Lazily creates the session entry. Lookup and mint are atomic with
    /// respect to other calls for the same session.
    pub fn get_or_create_token(&self, session_id: &str, label: &str, value: &str) -> String {
        let mut state = self.sessions.entry(session_id.to_string()).or_default();

        if let Some(token) = state.token_for_value(value).map(str::to_string) {
            return token;
        }

        state.mint(label, value)
    }

    /// Snapshot of a session's token mapping, or `None` for unknown sessions
    pub fn snapshot(&self, session_id: &str) -> Option<BTreeMap<String, String>> {
        self.sessions
            .get(session_id)
            .map(|state| state.tokens.clone())
    }

    /// Discard all state for a session; unknown sessions are a no-op
    pub fn clear(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Number of sessions currently holding state
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
