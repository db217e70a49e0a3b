//! End-to-end tests of the JSON API against the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use symptomatch_db::Database;
use symptomatch_test_utils::{advisor_with, seeded_database, FailingStore, ScriptedBackend};
use symptomatch_web::{router::build_router, state::AppState};
use tower::ServiceExt;

async fn app_with(backend: Arc<ScriptedBackend>) -> Router {
    build_router(AppState::new(seeded_database().await, advisor_with(backend)))
}

async fn app() -> (Router, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::replying("This may be a migraine."));
    (app_with(backend.clone()).await, backend)
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app().await;
    let (status, body) = send(&app, request("GET", "/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (app, _) = app().await;
    let req = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

// ── Disease admin ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_is_stable_without_mutation() {
    let (app, _) = app().await;
    let (status, first) = send(&app, request("GET", "/api/diseases", None)).await;
    let (_, second) = send(&app, request("GET", "/api/diseases", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&first), vec!["Flu", "Cold"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn created_disease_is_listed_with_identical_fields() {
    let (app, _) = app().await;
    let (status, created) = send(
        &app,
        request(
            "POST",
            "/api/diseases",
            Some(json!({
                "name": "Migraine",
                "symptoms": "Headache, Nausea , ",
                "description": "Recurrent headaches."
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["symptoms"], json!(["Headache", "Nausea"]));
    assert!(created["id"].is_string());

    let (_, list) = send(&app, request("GET", "/api/diseases", None)).await;
    let stored = list
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == created["id"])
        .cloned()
        .unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn create_with_missing_field_is_rejected() {
    let (app, _) = app().await;
    let (status, body) = send(
        &app,
        request("POST", "/api/diseases", Some(json!({ "name": "Ghost", "symptoms": ["Boo"] }))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name, symptoms, and description are required" }));

    let (_, list) = send(&app, request("GET", "/api/diseases", None)).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _) = app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/diseases")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request body"));
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let (app, _) = app().await;
    let (_, list) = send(&app, request("GET", "/api/diseases", None)).await;
    let flu_id = list[0]["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &format!("/api/diseases/{flu_id}"),
            Some(json!({
                "name": "Influenza",
                "symptoms": ["Fever", "Chills"],
                "description": "Seasonal influenza."
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], flu_id.as_str());
    assert_eq!(updated["name"], "Influenza");

    let (_, list) = send(&app, request("GET", "/api/diseases", None)).await;
    assert_eq!(names(&list), vec!["Influenza", "Cold"]);
}

#[tokio::test]
async fn update_with_invalid_body_is_rejected_and_record_unchanged() {
    let (app, _) = app().await;
    let (_, before) = send(&app, request("GET", "/api/diseases", None)).await;
    let flu_id = before[0]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/diseases/{flu_id}");

    for body in [
        json!({ "name": "Influenza", "symptoms": ["Fever"] }),
        json!({ "name": "  ", "symptoms": ["Fever"], "description": "Seasonal influenza." }),
        json!({ "name": "Influenza", "symptoms": [], "description": "Seasonal influenza." }),
    ] {
        let (status, err) = send(&app, request("PUT", &uri, Some(body))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err, json!({ "error": "Name, symptoms, and description are required" }));
    }

    let (_, after) = send(&app, request("GET", "/api/diseases", None)).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn update_of_unknown_or_malformed_id_is_not_found() {
    let (app, _) = app().await;
    let body = json!({ "name": "X", "symptoms": ["Y"], "description": "Z" });

    let (status, err) = send(
        &app,
        request("PUT", "/api/diseases/6f1c2a7e-0000-4000-8000-000000000000", Some(body.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err, json!({ "error": "Disease not found" }));

    let (status, _) = send(&app, request("PUT", "/api/diseases/not-an-id", Some(body))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_record_and_second_delete_is_not_found() {
    let (app, _) = app().await;
    let (_, list) = send(&app, request("GET", "/api/diseases", None)).await;
    let cold_id = list[1]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/diseases/{cold_id}");

    let (status, body) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Disease deleted successfully" }));

    let (_, list) = send(&app, request("GET", "/api/diseases", None)).await;
    assert_eq!(names(&list), vec!["Flu"]);

    let (status, _) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_failure_on_list_hides_the_cause() {
    let mut db: Database = seeded_database().await;
    db.diseases = Arc::new(FailingStore);
    let app = build_router(AppState::new(
        db,
        advisor_with(Arc::new(ScriptedBackend::replying("unused"))),
    ));

    let (status, body) = send(&app, request("GET", "/api/diseases", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch diseases" }));
}

// ── Symptom catalog ──────────────────────────────────────────────────────────

#[tokio::test]
async fn symptom_search_is_case_insensitive_substring() {
    let (app, _) = app().await;
    let (status, body) = send(&app, request("GET", "/api/symptoms?query=NOSE", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Runny Nose"]);
}

#[tokio::test]
async fn symptom_search_without_query_returns_catalog() {
    let (app, _) = app().await;
    let (_, body) = send(&app, request("GET", "/api/symptoms", None)).await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

// ── Analyze ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn analyze_flu_scenario_comes_from_database() {
    let (app, backend) = app().await;
    let (status, body) = send(
        &app,
        request("POST", "/api/analyze", Some(json!({ "symptoms": ["Fever", "Headache"] }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "database");
    assert_eq!(body["diseaseFound"], true);
    assert_eq!(body["disease"]["name"], "Flu");
    assert_eq!(names(&body["matches"]), vec!["Flu"]);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn analyze_without_shared_symptom_falls_back_to_ai() {
    let (app, backend) = app().await;
    let (status, body) = send(
        &app,
        request("POST", "/api/analyze", Some(json!({ "symptoms": ["Headache", "Dizziness"] }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "source": "ai",
            "diseaseFound": false,
            "suggestion": "This may be a migraine."
        })
    );
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn analyze_does_not_trim_tokens_before_matching() {
    let (app, backend) = app().await;
    let (status, body) = send(
        &app,
        request("POST", "/api/analyze", Some(json!({ "symptoms": ["Fever "] }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "ai");
    assert_eq!(body["diseaseFound"], false);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn analyze_rejects_missing_or_empty_symptoms_before_any_lookup() {
    let (app, backend) = app().await;

    for body in [json!({}), json!({ "symptoms": [] }), json!({ "symptoms": "Fever" }), json!({ "symptoms": ["  "] })] {
        let (status, err) = send(&app, request("POST", "/api/analyze", Some(body))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err, json!({ "error": "Symptoms array is required" }));
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn analyze_ai_failure_is_a_server_error_not_a_miss() {
    let app = app_with(Arc::new(ScriptedBackend::failing("quota exceeded"))).await;
    let (status, body) = send(
        &app,
        request("POST", "/api/analyze", Some(json!({ "symptoms": ["Headache"] }))),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "AI service failed" }));
}

#[tokio::test]
async fn analyze_store_failure_never_reaches_ai() {
    let backend = Arc::new(ScriptedBackend::replying("unused"));
    let mut db = seeded_database().await;
    db.diseases = Arc::new(FailingStore);
    let app = build_router(AppState::new(db, advisor_with(backend.clone())));

    let (status, body) = send(
        &app,
        request("POST", "/api/analyze", Some(json!({ "symptoms": ["Fever"] }))),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to analyze symptoms" }));
    assert_eq!(backend.calls(), 0);
}

// ── Direct AI ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ai_route_returns_text_under_disease_key() {
    let (app, backend) = app().await;
    let (status, body) = send(
        &app,
        request("POST", "/api/ai", Some(json!({ "symptoms": ["Fever"] }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "disease": "This may be a migraine." }));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn ai_route_rejects_empty_symptoms() {
    let (app, backend) = app().await;
    let (status, body) = send(&app, request("POST", "/api/ai", Some(json!({ "symptoms": [] })))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No symptoms provided" }));
    assert_eq!(backend.calls(), 0);
}
