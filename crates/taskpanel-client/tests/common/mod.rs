/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for taskpanel-client tests

use taskpanel_client::{ClientConfig, TaskClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> TaskClient {
    TaskClient::with_base_url(ClientConfig::default(), &server.uri()).expect("client init")
}

/// JSON of a persisted task with the given id and executions
pub fn task_json(id: &str, name: &str, executions: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "command": "echo hi",
        "owner": "Jo",
        "serverName": "srv1",
        "taskExecutions": executions
    })
}
