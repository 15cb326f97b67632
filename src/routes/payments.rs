use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        page_dto::{ConfirmQuery, RefreshQuery},
        payment_dto::{PaymentFormPayload, SelectCandidatePayload, UpdatePaymentPayload},
    },
    error::{Error, Result},
    models::payment::PaymentUpdate,
    routes::NOTHING_TO_UPDATE,
    views::payments::{PaymentItem, PaymentsView},
    AppState,
};

pub const CONFIRM_DELETE: &str = "Êtes-vous sûr de vouloir supprimer ce paiement ?";

#[utoipa::path(
    get,
    path = "/api/pages/payments",
    params(
        ("refresh" = Option<bool>, Query, description = "Reload candidates and payments")
    ),
    responses(
        (status = 200, description = "Payments page", body = Json<PaymentsView>),
        (status = 502, description = "Data could not be loaded")
    )
)]
#[axum::debug_handler]
pub async fn payments_view(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.load_payments_page(query.refresh).await?;
    let session_selected = workspace.selected_session().is_some();
    Ok(Json(PaymentsView::build(workspace.payments_page(), session_selected)))
}

#[utoipa::path(
    put,
    path = "/api/pages/payments/candidate",
    request_body = SelectCandidatePayload,
    responses(
        (status = 200, description = "Candidate opened", body = Json<PaymentsView>),
        (status = 404, description = "Candidate not in the selected session")
    )
)]
#[axum::debug_handler]
pub async fn select_candidate(
    State(state): State<AppState>,
    Json(payload): Json<SelectCandidatePayload>,
) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.select_candidate(payload.candidate_id).await?;
    let session_selected = workspace.selected_session().is_some();
    Ok(Json(PaymentsView::build(workspace.payments_page(), session_selected)))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = PaymentFormPayload,
    responses(
        (status = 201, description = "Payment recorded", body = Json<PaymentItem>),
        (status = 400, description = "Invalid payload or no candidate selected"),
        (status = 502, description = "Store failure")
    )
)]
#[axum::debug_handler]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentFormPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let mut workspace = state.workspace.lock().await;
    let candidate_id = payload.candidate_id;
    let payment = workspace
        .add_payment(candidate_id, |candidate_id| payload.into_new_payment(candidate_id))
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentItem::from(&payment))))
}

#[utoipa::path(
    patch,
    path = "/api/payments/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    request_body = UpdatePaymentPayload,
    responses(
        (status = 200, description = "Payment updated", body = Json<PaymentItem>),
        (status = 400, description = "Invalid payload or no field to change"),
        (status = 502, description = "Store failure")
    )
)]
#[axum::debug_handler]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let update = PaymentUpdate::from(payload);
    if update.is_empty() {
        return Err(Error::BadRequest(NOTHING_TO_UPDATE.into()));
    }
    let mut workspace = state.workspace.lock().await;
    let payment = workspace.update_payment(id, update).await?;
    Ok(Json(PaymentItem::from(&payment)))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment ID"),
        ("confirm" = Option<bool>, Query, description = "Must be true to delete")
    ),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 428, description = "Confirmation required"),
        (status = 502, description = "Store failure")
    )
)]
#[axum::debug_handler]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ConfirmQuery>,
) -> Result<impl IntoResponse> {
    if !query.confirm {
        return Err(Error::ConfirmationRequired(CONFIRM_DELETE.to_string()));
    }
    let mut workspace = state.workspace.lock().await;
    workspace.delete_payment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
