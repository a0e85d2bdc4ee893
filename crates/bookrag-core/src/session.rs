//! Session store for uploaded books
//!
//! Each upload gets an explicit session keyed by a caller-supplied id, so a
//! later chat request reads the book it was actually asked about instead of
//! whatever file the previous request left behind.

use crate::error::{BookragError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// State held for one uploaded book
#[derive(Debug, Clone)]
pub struct Session {
    pub book_text: String,
    /// Stage-1 relationship analysis, once extraction has run
    pub relationship_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// In-memory, thread-safe session store
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the session for `id`
    pub fn put(&self, id: impl Into<String>, book_text: impl Into<String>) {
        let session = Session {
            book_text: book_text.into(),
            relationship_text: None,
            created_at: Utc::now(),
        };
        if let Ok(mut sessions) = self.inner.write() {
            sessions.insert(id.into(), session);
        }
    }

    /// Attach the relationship analysis to an existing session; no-op when absent
    pub fn set_relationship(&self, id: &str, relationship_text: impl Into<String>) {
        if let Ok(mut sessions) = self.inner.write() {
            if let Some(session) = sessions.get_mut(id) {
                session.relationship_text = Some(relationship_text.into());
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        self.inner.read().ok()?.get(id).cloned()
    }

    /// Like [`get`](Self::get) but with a typed error for request handlers
    pub fn get_required(&self, id: &str) -> Result<Session> {
        self.get(id)
            .ok_or_else(|| BookragError::SessionNotFound(id.to_string()))
    }

    pub fn remove(&self, id: &str) -> bool {
        self.inner
            .write()
            .map(|mut sessions| sessions.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|sessions| sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
