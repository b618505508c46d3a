use axum::{
    Router, middleware,
    routing::{delete, post},
};

use super::handlers::{create_session, delete_session};
use crate::middleware::auth::require_session;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", delete(delete_session))
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            require_session,
        ));

    Router::new()
        .route("/", post(create_session))
        .merge(protected)
}
