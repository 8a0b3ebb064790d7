//! Context Store - per-session key/value state.
//!
//! The store is the sole owner of every session context. Callers get a
//! [`SessionContext`] handle that shares state with every other handle for
//! the same session id; nothing outside the store keeps contexts alive
//! across calls.
//!
//! By default the store is an unbounded map whose entries live until removed.
//! Two optional bounds can be configured: a maximum number of sessions
//! (least-recently-used eviction) and an idle time-to-live after which a
//! session is treated as gone. Expired sessions are dropped whenever a new
//! session is inserted, and by [`ContextStore::sweep_expired`].

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use tracing::debug;

use super::config::ContextConfig;

/// Shared handle to one session's state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: Arc<str>,
    state: Arc<RwLock<Map<String, Value>>>,
}

impl SessionContext {
    fn new(id: &str) -> Self {
        Self {
            id: Arc::from(id),
            state: Arc::new(RwLock::new(Map::new())),
        }
    }

    /// The session id this context belongs to.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.state.read().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.state.write().insert(key.into(), value);
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.state.write().remove(key)
    }

    /// A copy of the whole state. Mutating it does not affect the context.
    pub fn get_all(&self) -> Map<String, Value> {
        self.state.read().clone()
    }

    /// Whether two handles refer to the same underlying session state.
    pub fn shares_state_with(&self, other: &SessionContext) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

struct Entry {
    context: SessionContext,
    last_access: Instant,
}

/// Process-lifetime store of session contexts.
pub struct ContextStore {
    sessions: Mutex<LruCache<String, Entry>>,
    idle_ttl: Option<Duration>,
}

impl ContextStore {
    /// Create a store with the given bounds.
    pub fn new(config: &ContextConfig) -> Self {
        let sessions = match config.max_sessions.and_then(NonZeroUsize::new) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            sessions: Mutex::new(sessions),
            idle_ttl: config.idle_ttl,
        }
    }

    /// An unbounded store whose sessions never expire.
    pub fn unbounded() -> Self {
        Self::new(&ContextConfig::default())
    }

    /// Return the context for `session_id`, creating an empty one if needed.
    pub fn get_context(&self, session_id: &str) -> SessionContext {
        let now = Instant::now();
        let mut sessions = self.sessions.lock();

        if let Some(entry) = sessions.get_mut(session_id) {
            if !self.is_expired(entry, now) {
                entry.last_access = now;
                return entry.context.clone();
            }
            debug!("Session {} expired, starting fresh", session_id);
        }

        self.evict_expired(&mut sessions, now);
        let context = SessionContext::new(session_id);
        let evicted = sessions.push(
            session_id.to_string(),
            Entry {
                context: context.clone(),
                last_access: now,
            },
        );
        if let Some((evicted_id, _)) = evicted.filter(|(id, _)| id != session_id) {
            debug!("Evicted least recently used session {}", evicted_id);
        }
        context
    }

    /// Remove the context for `session_id`. Returns whether one was removed.
    ///
    /// An expired session counts as already gone.
    pub fn remove_context(&self, session_id: &str) -> bool {
        let now = Instant::now();
        match self.sessions.lock().pop(session_id) {
            Some(entry) => !self.is_expired(&entry, now),
            None => false,
        }
    }

    /// Create a new session with a server-issued id.
    pub fn create_session(&self) -> SessionContext {
        let id = uuid::Uuid::new_v4().to_string();
        self.get_context(&id)
    }

    /// Whether a live session exists for `session_id`. Does not touch recency.
    pub fn contains(&self, session_id: &str) -> bool {
        let now = Instant::now();
        self.sessions
            .lock()
            .peek(session_id)
            .is_some_and(|entry| !self.is_expired(entry, now))
    }

    /// Number of stored sessions, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired session. Returns how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        let dropped = self.evict_expired(&mut self.sessions.lock(), Instant::now());
        if dropped > 0 {
            debug!("Swept {} expired sessions", dropped);
        }
        dropped
    }

    /// Pop expired entries from the least recently used end.
    ///
    /// Recency order matches `last_access` order, so the first live entry
    /// ends the scan.
    fn evict_expired(&self, sessions: &mut LruCache<String, Entry>, now: Instant) -> usize {
        if self.idle_ttl.is_none() {
            return 0;
        }
        let mut dropped = 0;
        while sessions
            .peek_lru()
            .is_some_and(|(_, entry)| self.is_expired(entry, now))
        {
            sessions.pop_lru();
            dropped += 1;
        }
        dropped
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        self.idle_ttl
            .is_some_and(|ttl| now.duration_since(entry.last_access) >= ttl)
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::unbounded()
    }
}
