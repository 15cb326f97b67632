use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        candidate_dto::{CandidateFormPayload, UpdateCandidatePayload},
        page_dto::{ConfirmQuery, RefreshQuery},
    },
    error::{Error, Result},
    models::candidate::CandidateUpdate,
    routes::NOTHING_TO_UPDATE,
    views::candidates::{CandidateItem, CandidatesView},
    AppState,
};

pub const CONFIRM_DELETE: &str = "Êtes-vous sûr de vouloir supprimer ce candidat ?";

#[utoipa::path(
    get,
    path = "/api/pages/candidates",
    params(
        ("refresh" = Option<bool>, Query, description = "Reload sessions and candidates")
    ),
    responses(
        (status = 200, description = "Candidates page", body = Json<CandidatesView>),
        (status = 502, description = "Sessions or candidates could not be loaded")
    )
)]
#[axum::debug_handler]
pub async fn candidates_view(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<impl IntoResponse> {
    let mut workspace = state.workspace.lock().await;
    workspace.load_candidates_page(query.refresh).await?;
    Ok(Json(CandidatesView::build(
        workspace.candidates_page(),
        workspace.selected_session_record(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CandidateFormPayload,
    responses(
        (status = 201, description = "Candidate added to the selected session", body = Json<CandidateItem>),
        (status = 400, description = "Invalid payload or no session selected"),
        (status = 502, description = "Store failure")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CandidateFormPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let mut workspace = state.workspace.lock().await;
    let candidate = workspace
        .add_candidate(|session_id| payload.into_new_candidate(session_id))
        .await?;
    Ok((StatusCode::CREATED, Json(CandidateItem::from(&candidate))))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated", body = Json<CandidateItem>),
        (status = 400, description = "Invalid payload or no field to change"),
        (status = 502, description = "Store failure")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let update = CandidateUpdate::from(payload);
    if update.is_empty() {
        return Err(Error::BadRequest(NOTHING_TO_UPDATE.into()));
    }
    let mut workspace = state.workspace.lock().await;
    let candidate = workspace.update_candidate(id, update).await?;
    Ok(Json(CandidateItem::from(&candidate)))
}

#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID"),
        ("confirm" = Option<bool>, Query, description = "Must be true to delete")
    ),
    responses(
        (status = 204, description = "Candidate and their payments deleted"),
        (status = 428, description = "Confirmation required"),
        (status = 502, description = "Store failure")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ConfirmQuery>,
) -> Result<impl IntoResponse> {
    if !query.confirm {
        return Err(Error::ConfirmationRequired(CONFIRM_DELETE.to_string()));
    }
    let mut workspace = state.workspace.lock().await;
    workspace.delete_candidate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
