// HTTP-level tests for the service router, exercised through
// tower::ServiceExt::oneshot without opening sockets.

use api::{create_router, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use risk_engine::{ScoringService, TrainingConfig};
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use tower::ServiceExt as _;

const BODY_LIMIT: usize = 1024 * 1024;
const MAX_BATCH: usize = 8;

fn service() -> ScoringService {
    static SERVICE: OnceLock<ScoringService> = OnceLock::new();
    SERVICE
        .get_or_init(|| ScoringService::initialize(&TrainingConfig::default()).expect("training"))
        .clone()
}

fn test_router() -> Router {
    create_router(Arc::new(AppState::new(service(), MAX_BATCH)))
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let resp = test_router().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.expect("read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(uri: &str, payload: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build request");
    send(req).await
}

#[tokio::test]
async fn health_reports_trained_models() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let (status, body) = send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "icu-ai-service");
    assert_eq!(body["models_loaded"], true);
    assert_eq!(body["risk_predictor_trained"], true);
    assert_eq!(body["bed_recommender_trained"], true);
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn predict_normal_vitals_with_wire_defaults() {
    let (status, body) = post_json("/predict", json!({"heartRate": 75, "spo2": 98, "temperature": 36.8})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule_based_score"], 0.0);
    assert_eq!(body["level"], "low");
    assert_eq!(body["contributions"]["heart_rate"], "Normal");
    assert_eq!(body["contributions"]["blood_pressure"], "Normal");
}

#[tokio::test]
async fn predict_extreme_vitals_is_critical() {
    let payload = json!({
        "heartRate": 130,
        "spo2": 85,
        "temperature": 40,
        "bloodPressureSystolic": 190,
        "bloodPressureDiastolic": 110,
        "respiratoryRate": 32
    });
    let (status, body) = post_json("/predict", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule_based_score"], 1.0);
    assert_eq!(body["level"], "critical");
    assert_eq!(body["contributions"]["respiratory_rate"], "Tachypnea");
}

#[tokio::test]
async fn predict_out_of_range_is_422() {
    let (status, body) = post_json("/predict", json!({"heartRate": 400, "spo2": 98, "temperature": 36.8})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "validation_error");
    assert_eq!(body["field"], "heartRate");
}

#[tokio::test]
async fn predict_missing_field_is_rejected() {
    let (status, body) = post_json("/predict", json!({"heartRate": 80})).await;

    assert!(status.is_client_error());
    assert_eq!(body["kind"], "malformed_request");
}

#[tokio::test]
async fn recommend_bed_for_isolation_patient() {
    let payload = json!({
        "severity_score": 0.5,
        "needs_ventilator": false,
        "needs_isolation": true,
        "age": 60,
        "risk_score": 0.5
    });
    let (status, body) = post_json("/recommend-bed", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_room"], "isolation");
    assert!(body["probabilities"]["isolation"].as_f64().unwrap() > 0.5);

    let sum: f64 = body["probabilities"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((sum - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn recommend_bed_rejects_bad_age() {
    let payload = json!({"severity_score": 0.2, "age": 200, "risk_score": 0.1});
    let (status, body) = post_json("/recommend-bed", payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "age");
}

#[tokio::test]
async fn batch_keeps_failures_in_place() {
    let payload = json!([
        {"heartRate": 75, "spo2": 98, "temperature": 36.8},
        {"heartRate": 400, "spo2": 98, "temperature": 36.8},
        {"heartRate": 75, "spo2": 90, "temperature": 36.8}
    ]);
    let (status, body) = post_json("/batch-predict", payload).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["status"], "ok");
    assert_eq!(items[1]["status"], "error");
    assert_eq!(items[1]["kind"], "validation_error");
    assert_eq!(items[2]["status"], "ok");
    assert_eq!(items[2]["rule_based_score"], 0.35);
}

#[tokio::test]
async fn batch_keeps_malformed_element_in_place() {
    let payload = json!([
        {"heartRate": 75, "spo2": 98, "temperature": 36.8},
        {"heartRate": "fast", "spo2": 98, "temperature": 36.8},
        {"spo2": 98},
        {"heartRate": 75, "spo2": 90, "temperature": 36.8}
    ]);
    let (status, body) = post_json("/batch-predict", payload).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["status"], "ok");
    assert_eq!(items[0]["rule_based_score"], 0.0);
    assert_eq!(items[1]["status"], "error");
    assert_eq!(items[1]["kind"], "malformed_request");
    assert_eq!(items[2]["status"], "error");
    assert_eq!(items[2]["kind"], "malformed_request");
    assert_eq!(items[3]["status"], "ok");
    assert_eq!(items[3]["rule_based_score"], 0.35);
}

#[tokio::test]
async fn batch_body_that_is_not_an_array_is_rejected() {
    let (status, body) = post_json("/batch-predict", json!({"heartRate": 75})).await;

    assert!(status.is_client_error());
    assert_eq!(body["kind"], "malformed_request");
}

#[tokio::test]
async fn batch_over_limit_is_400() {
    let sample = json!({"heartRate": 75, "spo2": 98, "temperature": 36.8});
    let payload = Value::Array(vec![sample; MAX_BATCH + 1]);
    let (status, body) = post_json("/batch-predict", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "batch_too_large");
}

#[tokio::test]
async fn empty_batch_returns_empty_array() {
    let (status, body) = post_json("/batch-predict", json!([])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn metrics_without_recorder_is_404() {
    let req = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .expect("build GET /metrics");
    let resp = test_router().oneshot(req).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn metrics_endpoint_reports_prediction_counts() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let router = create_router(Arc::new(AppState::new(service(), MAX_BATCH).with_metrics(handle)));
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");

    let text = metrics::with_local_recorder(&recorder, || {
        rt.block_on(async {
            let predict = Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(json!({"heartRate": 75, "spo2": 98, "temperature": 36.8}).to_string()))
                .expect("build POST /predict");
            let resp = router.clone().oneshot(predict).await.expect("oneshot");
            assert_eq!(resp.status(), StatusCode::OK);

            let scrape = Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .expect("build GET /metrics");
            let resp = router.oneshot(scrape).await.expect("oneshot");
            assert_eq!(resp.status(), StatusCode::OK);
            let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.expect("read body");
            String::from_utf8(bytes.to_vec()).expect("utf-8")
        })
    });

    assert!(text.contains("icu_ai_predictions_total{level=\"low\"} 1"), "{}", text);
}
