/*
[INPUT]:  Mock task API server
[OUTPUT]: Controller fixtures wired to the mock, task JSON builders
[POS]:    Test infrastructure - shared across taskpanel integration tests
[UPDATE]: When adding new test patterns or fixtures
*/

#![allow(dead_code)]

use serde_json::{Value, json};
use taskpanel::{Controller, NotificationCenter};
use taskpanel_client::{ClientConfig, TaskClient};
use wiremock::MockServer;

pub type TestController = Controller<TaskClient, NotificationCenter>;

/// Mock server plus a controller pointed at it. The returned center shares
/// the controller's notification ring.
pub async fn setup() -> (MockServer, TestController, NotificationCenter) {
    let server = MockServer::start().await;
    let client = TaskClient::with_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    let notifications = NotificationCenter::default();
    let controller = Controller::new(client, notifications.clone());
    (server, controller, notifications)
}

pub fn task_json(id: &str, name: &str) -> Value {
    task_with_executions(id, name, json!([]))
}

pub fn task_with_executions(id: &str, name: &str, executions: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "command": "echo hi",
        "owner": "Jo",
        "serverName": "srv1",
        "taskExecutions": executions
    })
}

pub fn execution_json(id: &str, output: &str) -> Value {
    json!({
        "id": id,
        "startTime": "2024-05-01T10:00:00Z",
        "endTime": "2024-05-01T10:00:02Z",
        "output": output
    })
}
