use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    dto::page_dto::{ExportFormat, ExportQuery},
    error::Result,
    services::export_service::{ExportService, ExportTable},
    AppState,
};

fn attachment(table: &ExportTable, format: ExportFormat, filename: String) -> Result<impl IntoResponse> {
    let buffer = ExportService::render(table, format)?;
    let disposition = format!("attachment; filename=\"{}\"", filename);
    tracing::info!(%filename, rows = table.rows.len(), "Export generated");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

/// Export the dashboard's candidates with the amount each paid
#[utoipa::path(
    get,
    path = "/api/exports/candidates",
    params(
        ("format" = Option<String>, Query, description = "csv (default) or xlsx")
    ),
    responses(
        (status = 200, description = "Candidates file"),
        (status = 502, description = "Data could not be loaded")
    )
)]
#[axum::debug_handler]
pub async fn export_candidates(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.load_dashboard_page(false).await?;
    let page = workspace.dashboard_page();
    let table = ExportService::candidates_table(page.candidates(), &page.groups());
    let filename = ExportService::file_name("candidats", workspace.selected_session(), query.format);
    attachment(&table, query.format, filename)
}

/// Export the payments in the dashboard's scope
#[utoipa::path(
    get,
    path = "/api/exports/payments",
    params(
        ("format" = Option<String>, Query, description = "csv (default) or xlsx")
    ),
    responses(
        (status = 200, description = "Payments file"),
        (status = 502, description = "Data could not be loaded")
    )
)]
#[axum::debug_handler]
pub async fn export_payments(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.load_dashboard_page(false).await?;
    let page = workspace.dashboard_page();
    let table = ExportService::payments_table(&page.scoped_payments(), page.candidates());
    let filename = ExportService::file_name("paiements", workspace.selected_session(), query.format);
    attachment(&table, query.format, filename)
}
