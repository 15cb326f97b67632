use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::session_dto::SelectSessionPayload, error::Result, views::WorkspaceView, AppState,
};

#[utoipa::path(
    get,
    path = "/api/workspace",
    responses(
        (status = 200, description = "Selected session and session picker", body = Json<WorkspaceView>),
        (status = 502, description = "Sessions could not be loaded")
    )
)]
#[axum::debug_handler]
pub async fn get_workspace(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.load_candidates_page(false).await?;
    Ok(Json(WorkspaceView::build(&workspace)))
}

#[utoipa::path(
    put,
    path = "/api/workspace/session",
    request_body = SelectSessionPayload,
    responses(
        (status = 200, description = "Session selected, pages reloaded", body = Json<WorkspaceView>),
        (status = 404, description = "Unknown session"),
        (status = 502, description = "A page failed to reload")
    )
)]
#[axum::debug_handler]
pub async fn select_session(
    State(state): State<AppState>,
    Json(payload): Json<SelectSessionPayload>,
) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.select_session(payload.session_id).await?;
    Ok(Json(WorkspaceView::build(&workspace)))
}
