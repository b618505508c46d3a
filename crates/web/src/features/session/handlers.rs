use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::session::{SessionContext, access_code_matches};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 255, message = "Access code is required"))]
    pub access_code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: Uuid,
    pub started_at: NaiveDateTime,
}

#[utoipa::path(
    post,
    path = "/api/session",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Access code accepted", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid access code")
    ),
    tag = "session"
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    if !access_code_matches(&state.access_code, &req.access_code) {
        tracing::warn!("Rejected invalid access code");
        return Err(WebError::Unauthorized);
    }

    let session = state.sessions.open().await;
    tracing::info!("Session opened");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: session.token,
            started_at: session.started_at,
        }),
    )
        .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/session",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "session"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Response, WebError> {
    state.sessions.close(&session.token).await;
    tracing::info!("Session closed");

    Ok(StatusCode::NO_CONTENT.into_response())
}
