use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::{dto::page_dto::RefreshQuery, error::Result, views::dashboard::DashboardView, AppState};

#[utoipa::path(
    get,
    path = "/api/pages/dashboard",
    params(
        ("refresh" = Option<bool>, Query, description = "Reload sessions, candidates and payments")
    ),
    responses(
        (status = 200, description = "Dashboard tiles, revenue and unpaid candidates", body = Json<DashboardView>),
        (status = 502, description = "Data could not be loaded")
    )
)]
#[axum::debug_handler]
pub async fn dashboard_view(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.load_candidates_page(false).await?;
    workspace.load_dashboard_page(query.refresh).await?;
    Ok(Json(DashboardView::build(
        workspace.dashboard_page(),
        workspace.selected_session_record(),
    )))
}
