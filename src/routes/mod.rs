pub mod candidates;
pub mod dashboard;
pub mod docs;
pub mod export;
pub mod health;
pub mod payments;
pub mod sessions;
pub mod workspace;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::AppState;

/// Answer to a PATCH whose body changes no field.
pub const NOTHING_TO_UPDATE: &str = "Aucune modification à enregistrer";

/// Every route of the console, without transport layers.
pub fn router(state: AppState) -> Router {
    let pages = Router::new()
        .route("/api/workspace", get(workspace::get_workspace))
        .route("/api/workspace/session", put(workspace::select_session))
        .route("/api/pages/candidates", get(candidates::candidates_view))
        .route("/api/pages/payments", get(payments::payments_view))
        .route("/api/pages/payments/candidate", put(payments::select_candidate))
        .route("/api/pages/dashboard", get(dashboard::dashboard_view));

    let records = Router::new()
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/candidates", post(candidates::create_candidate))
        .route(
            "/api/candidates/:id",
            patch(candidates::update_candidate).delete(candidates::delete_candidate),
        )
        .route("/api/payments", post(payments::create_payment))
        .route(
            "/api/payments/:id",
            patch(payments::update_payment).delete(payments::delete_payment),
        );

    let exports = Router::new()
        .route("/api/exports/candidates", get(export::export_candidates))
        .route("/api/exports/payments", get(export::export_payments));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi_json))
        .merge(pages)
        .merge(records)
        .merge(exports)
        .with_state(state)
}
