use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::session_dto::{CreateSessionPayload, SessionResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = CreateSessionPayload,
    responses(
        (status = 201, description = "Session created and selected", body = Json<SessionResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 502, description = "Store failure")
    )
)]
#[axum::debug_handler]
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let mut workspace = state.workspace.lock().await;
    let session = workspace.create_session(payload.into()).await?;
    tracing::info!(session_id = %session.id, name = %session.name, "Session created");
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&session))))
}
