//! Tests for the REST client and the background request worker
//!
//! Every test runs against a local wiremock server standing in for the
//! sentiment backend.

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentui::api::{ApiClient, ApiError, PredictedMark};
use sentui::services::{spawn_api_service, ApiRequest, ApiResponse};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).expect("client should build")
}

fn csv_file(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, "text,src\nGreat,shop\n").expect("should write csv");
    path
}

#[rstest]
#[tokio::test]
async fn login_sends_credentials_as_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(query_param("login", "anna"))
        .and(query_param("password", "secret1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-token",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .login("anna", "secret1")
        .await
        .expect("login should succeed");

    assert_eq!(token.access_token.as_deref(), Some("jwt-token"));
}

#[rstest]
#[tokio::test]
async fn login_rejection_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "bad"})))
        .mount(&server)
        .await;

    let result = client_for(&server).login("anna", "wrong-pass").await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[rstest]
#[tokio::test]
async fn register_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .and(body_json(json!({"login": "anna", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12, "login": "anna"})))
        .mount(&server)
        .await;

    let user = client_for(&server)
        .register("anna", "secret1")
        .await
        .expect("register should succeed");

    assert_eq!(user.id.as_deref(), Some("12"));
    assert_eq!(user.login.as_deref(), Some("anna"));
}

#[rstest]
#[tokio::test]
async fn get_user_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(header("authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "login": "anna",
            "sentimental_reports": [
                {"id": "r1", "created_at": "2025-03-05T11:07:00"},
                {"id": 2, "created_at": "2025-03-06T09:00:00"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token(Some("jwt-token".to_string()));
    let profile = client.get_user("u1").await.expect("profile should load");

    let ids: Vec<&str> = profile.sentimental_reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "2"]);
}

#[rstest]
#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/json/r1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_report("r1").await;

    match result {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[rstest]
#[tokio::test]
async fn upload_then_fetches_created_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r9"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/json/r9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r9",
            "created_at": "2025-03-05T11:07:00",
            "prediction": [
                {"id": 1, "text": "Great", "src": "shop", "label": 1},
                {"text": "Meh", "label": "0"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = csv_file(&dir, "reviews.csv");
    let report = client_for(&server)
        .upload_report(&file)
        .await
        .expect("upload should succeed");

    assert_eq!(report.id, "r9");
    assert_eq!(report.prediction.len(), 2);
    assert_eq!(report.prediction[1].src, None);
}

#[rstest]
#[tokio::test]
async fn upload_without_id_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = csv_file(&dir, "reviews.csv");
    let result = client_for(&server).upload_report(&file).await;

    assert!(matches!(result, Err(ApiError::MissingReportId)));
}

#[rstest]
#[tokio::test]
async fn upload_of_missing_file_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .upload_report(std::path::Path::new("/nonexistent/reviews.csv"))
        .await;

    assert!(matches!(result, Err(ApiError::File { .. })));
}

#[rstest]
#[tokio::test]
async fn delete_and_download_hit_report_routes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/reports/r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/csv/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"text,label\nGreat,1\n".to_vec()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_report("r1").await.expect("delete should succeed");
    let bytes = client.download_report_csv("r1").await.expect("csv should download");

    assert_eq!(bytes, b"text,label\nGreat,1\n");
}

#[rstest]
#[case(json!({"predicted_mark": 1, "text": "Great"}), PredictedMark::Id(1))]
#[case(json!({"predicted_mark": "negative"}), PredictedMark::Key("negative".to_string()))]
#[tokio::test]
async fn predict_one_accepts_both_mark_forms(
    #[case] body: serde_json::Value,
    #[case] expected: PredictedMark,
) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict-one/"))
        .and(body_json(json!({"text": "Great"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let prediction = client_for(&server)
        .predict_one("Great")
        .await
        .expect("prediction should succeed");

    assert_eq!(prediction.predicted_mark, expected);
}

#[rstest]
#[tokio::test]
async fn predict_metrics_returns_raw_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict-one/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "f1-macro": 0.81,
            "classes": {"1": {"precision": 0.9, "recall": 0.8, "f1": 0.85}}
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = csv_file(&dir, "labelled.csv");
    let value = client_for(&server)
        .predict_metrics(&file)
        .await
        .expect("metrics should succeed");

    assert_eq!(value["f1-macro"], json!(0.81));
}

#[rstest]
#[tokio::test]
async fn worker_delivers_responses_for_queued_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/json/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1",
            "created_at": "2025-03-05T11:07:00",
            "prediction": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/reports/r2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (tx, mut rx) = spawn_api_service(client_for(&server));
    tx.send(ApiRequest::FetchReport {
        report_id: "r1".to_string(),
    })
    .expect("worker should accept requests");
    tx.send(ApiRequest::DeleteReport {
        report_id: "r2".to_string(),
    })
    .expect("worker should accept requests");

    let mut fetched = false;
    let mut deleted = false;
    for _ in 0..2 {
        let response = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("worker should respond in time")
            .expect("channel should stay open");
        match response {
            ApiResponse::ReportResult { report_id, result } => {
                assert_eq!(report_id, "r1");
                assert!(result.is_ok());
                fetched = true;
            }
            ApiResponse::DeleteResult { report_id, result } => {
                assert_eq!(report_id, "r2");
                assert!(result.is_ok());
                deleted = true;
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    assert!(fetched && deleted);
}

#[rstest]
#[tokio::test]
async fn worker_exports_csv_into_target_dir() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/csv/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"a,b\n".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let (tx, mut rx) = spawn_api_service(client_for(&server));
    tx.send(ApiRequest::ExportReport {
        report_id: "r1".to_string(),
        label: "05.03.2025, 14:07".to_string(),
        dir: dir.path().to_path_buf(),
    })
    .expect("worker should accept requests");

    let response = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("worker should respond in time")
        .expect("channel should stay open");

    match response {
        ApiResponse::ExportResult { result, .. } => {
            let written = result.expect("export should succeed");
            assert_eq!(
                written,
                dir.path().join("tonality-report-05.03.2025-14-07.csv")
            );
            assert_eq!(std::fs::read(&written).expect("file exists"), b"a,b\n");
        }
        other => panic!("unexpected response: {:?}", other),
    }
}
