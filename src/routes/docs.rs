use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "Training center back office", description = "Sessions, candidates and payments"),
    paths(
        routes::health::health,
        routes::workspace::get_workspace,
        routes::workspace::select_session,
        routes::sessions::create_session,
        routes::candidates::candidates_view,
        routes::candidates::create_candidate,
        routes::candidates::update_candidate,
        routes::candidates::delete_candidate,
        routes::payments::payments_view,
        routes::payments::select_candidate,
        routes::payments::create_payment,
        routes::payments::update_payment,
        routes::payments::delete_payment,
        routes::dashboard::dashboard_view,
        routes::export::export_candidates,
        routes::export::export_payments,
    )
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
