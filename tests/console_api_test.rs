use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use training_center_backend::{app, database::memory::MemoryStore, AppState};

fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(app: &Router, name: &str, date: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/sessions",
        Some(json!({ "name": name, "date": date })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_str().unwrap().to_string()
}

async fn add_candidate(app: &Router, last_name: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/candidates",
        Some(json!({
            "nom": last_name,
            "prenom": "Camille",
            "date_naissance": "2001-07-21",
            "lieu_naissance": "Marseille",
            "sexe": "Féminin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_str().unwrap().to_string()
}

async fn add_payment(app: &Router, candidate_id: &str, amount: &str, status: &str) -> String {
    let (code, body) = send_json(
        app,
        "POST",
        "/api/payments",
        Some(json!({
            "candidate_id": candidate_id,
            "amount": amount,
            "mode": "CPF",
            "payment_type": "acompte",
            "date": "2026-01-10",
            "status": status
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED, "{}", body);
    body["id"].as_str().unwrap().to_string()
}

async fn open_candidate(app: &Router, candidate_id: &str) -> JsonValue {
    let (status, body) = send_json(
        app,
        "PUT",
        "/api/pages/payments/candidate",
        Some(json!({ "candidate_id": candidate_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}

#[tokio::test]
async fn health_reports_backend() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn openapi_lists_console_routes() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/sessions"].is_object());
    assert!(body["paths"]["/api/payments/{id}"].is_object());
}

#[tokio::test]
async fn created_session_is_selected_and_sessions_sort_by_date() {
    let app = test_app();
    let g1 = create_session(&app, "G1", "2026-01-06").await;

    let (status, workspace) = send_json(&app, "GET", "/api/workspace", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(workspace["selected_session"]["id"], g1.as_str());
    assert_eq!(workspace["selected_session"]["name"], "G1");
    assert_eq!(workspace["selected_session"]["date"], "2026-01-06");
    assert_eq!(workspace["selected_session"]["label"], "G1 (06/01/2026)");

    create_session(&app, "G0", "2025-12-01").await;
    let (_, page) = send_json(&app, "GET", "/api/pages/candidates?refresh=true", None).await;
    let names: Vec<&str> = page["sessions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["G1", "G0"]);
}

#[tokio::test]
async fn candidate_without_payments_is_unpaid() {
    let app = test_app();
    create_session(&app, "G1", "2026-01-06").await;
    let candidate = add_candidate(&app, "Roux").await;

    let view = open_candidate(&app, &candidate).await;
    assert_eq!(view["selected"]["summary"]["paid"], "0,00\u{a0}€");
    assert_eq!(view["selected"]["empty_message"], "Aucun paiement enregistré");

    let (status, dashboard) = send_json(&app, "GET", "/api/pages/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["stats"]["unpaid_count"], 1);
    assert_eq!(dashboard["collection_rate"], "0%");
    assert_eq!(dashboard["unpaid_candidates"][0]["nom"], "Roux");
}

#[tokio::test]
async fn completed_and_pending_payments_are_summed_separately() {
    let app = test_app();
    create_session(&app, "G1", "2026-01-06").await;
    let candidate = add_candidate(&app, "Roux").await;
    add_payment(&app, &candidate, "100", "completed").await;
    add_payment(&app, &candidate, "50", "pending").await;

    let view = open_candidate(&app, &candidate).await;
    assert_eq!(view["selected"]["summary"]["paid"], "100,00\u{a0}€");
    assert_eq!(view["selected"]["summary"]["pending"], "50,00\u{a0}€");
    assert_eq!(view["selected"]["summary"]["total"], "150,00\u{a0}€");

    let (_, dashboard) = send_json(&app, "GET", "/api/pages/dashboard", None).await;
    assert_eq!(dashboard["stats"]["pending_count"], 1);
    assert_eq!(dashboard["stats"]["paid_count"], 0);
    assert_eq!(dashboard["collection_rate"], "100%");
    assert_eq!(dashboard["revenue_by_mode"][0]["amount"], "100,00\u{a0}€");
}

#[tokio::test]
async fn empty_session_exports_header_only() {
    let app = test_app();
    let session = create_session(&app, "G1", "2026-01-06").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/exports/candidates")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert_eq!(disposition, format!("attachment; filename=\"candidats-{}.csv\"", session));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(
        csv,
        "Nom,Prénom,Date de naissance,Lieu de naissance,Sexe,CNAPS,Niveau d'études,Situation prof.,Montant payé\n"
    );
}

#[tokio::test]
async fn payments_export_as_xlsx() {
    let app = test_app();
    create_session(&app, "G1", "2026-01-06").await;
    let candidate = add_candidate(&app, "Roux").await;
    add_payment(&app, &candidate, "80", "completed").await;

    let (status, bytes) = send(&app, "GET", "/api/exports/payments?format=xlsx", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn deleted_payment_leaves_the_total() {
    let app = test_app();
    create_session(&app, "G1", "2026-01-06").await;
    let candidate = add_candidate(&app, "Roux").await;
    add_payment(&app, &candidate, "100", "completed").await;
    let refunded = add_payment(&app, &candidate, "40", "completed").await;

    let (status, _) = send(&app, "DELETE", &format!("/api/payments/{}?confirm=true", refunded), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let view = open_candidate(&app, &candidate).await;
    assert_eq!(view["selected"]["summary"]["paid"], "100,00\u{a0}€");
    assert_eq!(view["selected"]["payments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deletes_need_confirmation() {
    let app = test_app();
    create_session(&app, "G1", "2026-01-06").await;
    let candidate = add_candidate(&app, "Roux").await;
    let payment = add_payment(&app, &candidate, "100", "completed").await;

    let (status, body) = send_json(&app, "DELETE", &format!("/api/candidates/{}", candidate), None).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(body["confirm"], "Êtes-vous sûr de vouloir supprimer ce candidat ?");

    let (status, body) = send_json(&app, "DELETE", &format!("/api/payments/{}", payment), None).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(body["confirm"], "Êtes-vous sûr de vouloir supprimer ce paiement ?");

    let (_, page) = send_json(&app, "GET", "/api/pages/candidates", None).await;
    assert_eq!(page["candidates"].as_array().unwrap().len(), 1);
    assert_eq!(page["count_label"], "1 candidat");

    let (status, _) = send(&app, "DELETE", &format!("/api/candidates/{}?confirm=true", candidate), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, page) = send_json(&app, "GET", "/api/pages/candidates", None).await;
    assert_eq!(page["empty_message"], "Aucun candidat dans cette session");
}

#[tokio::test]
async fn invalid_forms_are_rejected_before_the_store() {
    let app = test_app();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({ "name": "  ", "date": "2026-01-06" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_session(&app, "G1", "2026-01-06").await;
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({
            "nom": "",
            "prenom": "Camille",
            "date_naissance": "2001-07-21",
            "lieu_naissance": "Marseille"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let candidate = add_candidate(&app, "Roux").await;
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/payments",
        Some(json!({ "candidate_id": candidate, "amount": "-10" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn adding_a_candidate_without_session_fails() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({
            "nom": "Roux",
            "prenom": "Camille",
            "date_naissance": "2001-07-21",
            "lieu_naissance": "Marseille"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Aucune session sélectionnée");
}

#[tokio::test]
async fn pages_without_session_show_placeholders() {
    let app = test_app();
    let (status, payments) = send_json(&app, "GET", "/api/pages/payments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments["placeholder"], "Sélectionnez une session pour voir les paiements");

    let (_, dashboard) = send_json(&app, "GET", "/api/pages/dashboard", None).await;
    assert_eq!(dashboard["placeholder"], "Sélectionnez une session pour voir le tableau de bord");
}

#[tokio::test]
async fn payment_defaults_to_the_open_candidate_and_can_be_settled() {
    let app = test_app();
    create_session(&app, "G1", "2026-01-06").await;
    let candidate = add_candidate(&app, "Roux").await;
    open_candidate(&app, &candidate).await;

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/payments",
        Some(json!({ "amount": 250, "status": "pending", "notes": "chèque à encaisser" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["candidate_id"], candidate.as_str());
    assert_eq!(created["status_label"], "En attente");

    let id = created["id"].as_str().unwrap();
    let (status, updated) = send_json(
        &app,
        "PATCH",
        &format!("/api/payments/{}", id),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status_label"], "Complété");
    assert_eq!(updated["notes"], "chèque à encaisser");

    let (status, cleared) = send_json(
        &app,
        "PATCH",
        &format!("/api/payments/{}", id),
        Some(json!({ "notes": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["notes"].is_null());

    let (_, view) = send_json(&app, "GET", "/api/pages/payments", None).await;
    assert_eq!(view["selected"]["summary"]["paid"], "250,00\u{a0}€");
    assert_eq!(view["selected"]["summary"]["pending"], "0,00\u{a0}€");
}

#[tokio::test]
async fn empty_updates_are_rejected() {
    let app = test_app();
    create_session(&app, "G1", "2026-01-06").await;
    let candidate = add_candidate(&app, "Roux").await;
    let payment = add_payment(&app, &candidate, "100", "completed").await;

    for uri in [
        format!("/api/candidates/{}", candidate),
        format!("/api/payments/{}", payment),
    ] {
        let (status, body) = send_json(&app, "PATCH", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Aucune modification à enregistrer");
    }
}
