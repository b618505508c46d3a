use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::session::SessionRegistry;

/// Rejects requests without a bearer token for an open, authenticated
/// session. The session is handed to handlers as a request extension.
pub async fn require_session(
    State(sessions): State<SessionRegistry>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| Uuid::parse_str(token.trim()).ok())
        .ok_or(WebError::Unauthorized)?;

    match sessions.get(&token).await {
        Some(session) if session.authenticated => {
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        _ => {
            tracing::warn!("Request with unknown or closed session");
            Err(WebError::Unauthorized)
        }
    }
}
