/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for the task API client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::time::Duration;

use common::{client_for, setup_mock_server, task_json};
use taskpanel_client::{ClientConfig, NewTask, TaskApi, TaskApiError, TaskClient};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(TaskClient::new());
    assert_eq!(client.base_url().host_str(), Some("localhost"));
}

#[test]
fn test_client_with_timeouts() {
    let config = ClientConfig {
        timeout: Some(Duration::from_secs(30)),
        connect_timeout: Some(Duration::from_secs(5)),
    };
    let _client = assert_ok!(TaskClient::with_config(config));
}

#[test]
fn test_client_rejects_garbage_url() {
    let err = assert_err!(TaskClient::with_base_url(ClientConfig::default(), "not a url"));
    assert!(matches!(err, TaskApiError::UrlParse(_)));
}

#[tokio::test]
async fn test_transport_failure_on_list_is_fetch_error() {
    // Nothing listens on port 9 of localhost in the test environment.
    let client = assert_ok!(TaskClient::with_base_url(
        ClientConfig::default(),
        "http://127.0.0.1:9"
    ));
    let err = assert_err!(client.list().await);
    assert!(matches!(err, TaskApiError::Fetch { .. }));
}

#[tokio::test]
async fn test_create_then_run_through_trait_object() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(
            "t1",
            "Backup",
            serde_json::json!([]),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tasks/t1/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "exec-1234567890",
            "startTime": "2024-01-01T00:00:00Z",
            "endTime": "2024-01-01T00:00:01Z",
            "output": "hi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api: Box<dyn TaskApi> = Box::new(client_for(&server));
    let created = assert_ok!(api.create(&NewTask::new("Backup", "echo hi", "Jo", "srv1")).await);
    let id = assert_ok!(created.require_id()).to_string();
    let execution = assert_ok!(api.run(&id).await);

    assert_eq!(execution.short_id(), "exec-123");
    assert_eq!(execution.output.as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).list().await);
    assert!(matches!(err, TaskApiError::Serialization(_)));
}
