use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// State of one client session, created when the access code is accepted
/// and discarded on logout.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub token: Uuid,
    pub authenticated: bool,
    pub started_at: NaiveDateTime,
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self) -> SessionContext {
        let context = SessionContext {
            token: Uuid::new_v4(),
            authenticated: true,
            started_at: Utc::now().naive_utc(),
        };
        self.sessions
            .write()
            .await
            .insert(context.token, context.clone());
        context
    }

    pub async fn get(&self, token: &Uuid) -> Option<SessionContext> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Returns whether the session existed.
    pub async fn close(&self, token: &Uuid) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

/// Plain string comparison against the shared tournament code
pub fn access_code_matches(expected: &str, given: &str) -> bool {
    expected == given.trim()
}
