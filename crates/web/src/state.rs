use std::sync::Arc;

use axum::extract::FromRef;
use storage::ScoreStore;

use crate::session::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScoreStore>,
    pub sessions: SessionRegistry,
    pub access_code: Arc<str>,
    pub leaderboard_refresh_secs: u64,
}

impl FromRef<AppState> for SessionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
