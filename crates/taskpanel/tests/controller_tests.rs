/*
[INPUT]:  Mock task API responses, user actions
[OUTPUT]: Test results for controller state transitions and notifications
[POS]:    Integration tests - controller against the HTTP client
[UPDATE]: When controller actions or reconciliation rules change
*/

mod common;

use async_trait::async_trait;
use common::{execution_json, setup, task_json, task_with_executions};
use serde_json::json;
use taskpanel::notify::Level;
use taskpanel::output::{ExecutionStatus, OutputView};
use taskpanel::{ActiveView, Confirm, ConfirmRequest, Decision, ViewState};
use taskpanel_client::{NewTask, Task};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// Answers with a fixed decision and remembers how often it was asked.
struct CountingConfirm {
    answer: Decision,
    asked: usize,
}

impl CountingConfirm {
    fn new(answer: Decision) -> Self {
        Self { answer, asked: 0 }
    }
}

#[async_trait]
impl Confirm for CountingConfirm {
    async fn confirm(&mut self, request: &ConfirmRequest) -> Decision {
        assert!(request.title.starts_with("Are you sure"));
        self.asked += 1;
        self.answer
    }
}

fn persisted(id: &str, name: &str) -> Task {
    serde_json::from_value(task_json(id, name)).expect("task fixture")
}

#[tokio::test]
async fn test_load_replaces_tasks() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "Backup"),
            task_json("t2", "Cleanup")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let state = controller.load(ViewState::default()).await;
    assert!(!state.loading);
    assert_eq!(state.tasks.len(), 2);
    assert_eq!(state.tasks[1].name, "Cleanup");
    assert!(notifications.snapshot().is_empty());
}

#[tokio::test]
async fn test_load_failure_keeps_previous_tasks() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let before = ViewState {
        tasks: vec![persisted("t1", "Backup")],
        ..ViewState::default()
    };
    let state = controller.load(before).await;
    assert_eq!(state.tasks.len(), 1);
    assert!(!state.loading);

    let latest = notifications.latest().expect("notification");
    assert_eq!(latest.level, Level::Error);
    assert_eq!(latest.description, "Failed to load tasks from the API.");
}

#[tokio::test]
async fn test_blank_search_is_a_reload() {
    let (server, controller, _notifications) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "Backup")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let state = controller.search(ViewState::default(), "   ").await;
    assert_eq!(state.tasks.len(), 1);
}

#[tokio::test]
async fn test_search_not_found_is_empty_without_error() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks/search"))
        .and(query_param("name", "nope"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let before = ViewState {
        tasks: vec![persisted("t1", "Backup")],
        ..ViewState::default()
    };
    let state = controller.search(before, "nope").await;
    assert!(state.tasks.is_empty());
    assert!(!notifications.has_errors());
}

#[tokio::test]
async fn test_search_failure_clears_tasks() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let before = ViewState {
        tasks: vec![persisted("t1", "Backup")],
        ..ViewState::default()
    };
    let state = controller.search(before, "Backup").await;
    assert!(state.tasks.is_empty());
    assert_eq!(
        notifications.latest().map(|n| n.description),
        Some("Failed to execute search.".to_string())
    );
}

#[tokio::test]
async fn test_create_appends_and_closes_form() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_json(json!({
            "name": "Backup",
            "command": "echo hi",
            "owner": "Jo",
            "serverName": "srv1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json("t1", "Backup")))
        .expect(1)
        .mount(&server)
        .await;

    let state = ViewState::default().open_create_form();
    let state = controller
        .submit_form(state, NewTask::new("Backup", "echo hi", "Jo", "srv1"))
        .await;

    assert!(!state.form_open);
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.tasks[0].id.as_deref(), Some("t1"));
    assert_eq!(state.tasks[0].server_name, "srv1");
    assert_eq!(
        notifications.latest().map(|n| n.to_string()),
        Some("Success: Task \"Backup\" created.".to_string())
    );
}

#[tokio::test]
async fn test_repeated_creates_append_in_order() {
    let (server, controller, _notifications) = setup().await;
    for (id, name) in [("t1", "A"), ("t2", "B"), ("t3", "C")] {
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .and(body_json(json!({
                "name": name,
                "command": "echo hi",
                "owner": "Jo",
                "serverName": "srv1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(task_json(id, name)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut state = ViewState::default();
    for name in ["A", "B", "C"] {
        state = controller
            .create(state, NewTask::new(name, "echo hi", "Jo", "srv1"))
            .await;
    }
    let names: Vec<_> = state.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_create_failure_keeps_form_open() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(400).set_body_string("name taken"))
        .mount(&server)
        .await;

    let state = ViewState::default().open_create_form();
    let state = controller
        .create(state, NewTask::new("Backup", "echo hi", "Jo", "srv1"))
        .await;

    assert!(state.form_open);
    assert!(state.tasks.is_empty());
    let latest = notifications.latest().expect("notification");
    assert_eq!(latest.level, Level::Error);
    assert!(latest.description.contains("400"));
    assert!(latest.description.contains("name taken"));
}

#[tokio::test]
async fn test_edit_replaces_task_by_id() {
    let (server, controller, _notifications) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("t2", "Renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let target = persisted("t2", "Cleanup");
    let state = ViewState {
        tasks: vec![persisted("t1", "Backup"), target.clone()],
        ..ViewState::default()
    }
    .open_edit_form(&target);

    let state = controller
        .submit_form(state, NewTask::new("Renamed", "echo hi", "Jo", "srv1"))
        .await;

    assert!(!state.form_open);
    assert!(state.editing_task.is_none());
    assert_eq!(state.tasks[0].name, "Backup");
    assert_eq!(state.tasks[1].name, "Renamed");
}

#[tokio::test]
async fn test_edit_failure_keeps_state() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/t1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such task"))
        .expect(1)
        .mount(&server)
        .await;

    let target = persisted("t1", "Backup");
    let before = ViewState {
        tasks: vec![target.clone()],
        ..ViewState::default()
    }
    .open_edit_form(&target);

    let state = controller
        .submit_form(before.clone(), NewTask::new("Renamed", "echo hi", "Jo", "srv1"))
        .await;

    assert_eq!(state, before);
    assert!(state.form_open);
    let latest = notifications.latest().expect("notification");
    assert_eq!(latest.level, Level::Error);
    assert!(latest.description.contains("404"));
    assert!(latest.description.contains("no such task"));
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let (server, controller, _notifications) = setup().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let target = persisted("t1", "Backup");
    let before = ViewState {
        tasks: vec![target.clone()],
        ..ViewState::default()
    };
    let mut confirm = CountingConfirm::new(Decision::Cancelled);
    let state = controller.delete(before.clone(), &target, &mut confirm).await;

    assert_eq!(confirm.asked, 1);
    assert_eq!(state, before);
}

#[tokio::test]
async fn test_confirmed_delete_removes_task() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let target = persisted("t1", "Backup");
    let state = ViewState {
        tasks: vec![target.clone(), persisted("t2", "Cleanup")],
        ..ViewState::default()
    };
    let state = controller
        .delete(state, &target, &mut Decision::Confirmed)
        .await;

    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.tasks[0].name, "Cleanup");
    assert_eq!(
        notifications.latest().map(|n| n.level),
        Some(Level::Success)
    );
}

#[tokio::test]
async fn test_delete_failure_keeps_tasks() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/t1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .expect(1)
        .mount(&server)
        .await;

    let target = persisted("t1", "Backup");
    let before = ViewState {
        tasks: vec![target.clone(), persisted("t2", "Cleanup")],
        ..ViewState::default()
    };
    let state = controller
        .delete(before.clone(), &target, &mut Decision::Confirmed)
        .await;

    assert_eq!(state.tasks, before.tasks);
    let latest = notifications.latest().expect("notification");
    assert_eq!(latest.level, Level::Error);
    assert!(latest.description.contains("disk full"));
}

#[tokio::test]
async fn test_delete_without_id_neither_asks_nor_sends() {
    let (server, controller, _notifications) = setup().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let draft = Task {
        name: "draft".to_string(),
        ..Task::default()
    };
    let mut confirm = CountingConfirm::new(Decision::Confirmed);
    let state = controller
        .delete(ViewState::default(), &draft, &mut confirm)
        .await;

    assert_eq!(confirm.asked, 0);
    assert!(state.tasks.is_empty());
}

#[tokio::test]
async fn test_run_shows_latest_execution() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/t1/run"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(execution_json("9f8e7d6c-5b4a-3210", "hi\n")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_with_executions(
            "t1",
            "Backup",
            json!([
                execution_json("old", "error: disk full"),
                execution_json("9f8e7d6c-5b4a-3210", "hi\n")
            ])
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let target = persisted("t1", "Backup");
    let state = ViewState {
        tasks: vec![target.clone()],
        ..ViewState::default()
    };
    let state = controller.run(state, &target).await;

    assert!(!state.loading);
    assert_eq!(state.active_view, ActiveView::Output);
    let selected = state.selected_task_for_output.as_ref().expect("selected");
    assert_eq!(selected.task_executions.len(), 2);

    match OutputView::from_task(selected) {
        OutputView::Latest(latest) => {
            assert_eq!(latest.status, ExecutionStatus::Succeeded);
            assert_eq!(latest.output, "hi\n");
        }
        OutputView::NoHistory => panic!("expected an execution"),
    }

    let titles: Vec<_> = notifications
        .snapshot()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Executing Command", "Command Complete"]);
    assert_eq!(
        notifications.latest().map(|n| n.description),
        Some("Execution ID: 9f8e7d6c".to_string())
    );
}

#[tokio::test]
async fn test_run_failure_stays_on_output() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/t1/run"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let target = persisted("t1", "Backup");
    let state = controller.run(ViewState::default(), &target).await;

    assert!(!state.loading);
    assert_eq!(state.active_view, ActiveView::Output);
    assert_eq!(state.selected_task_for_output, Some(target));
    let latest = notifications.latest().expect("notification");
    assert_eq!(latest.title, "Execution Failed");
    assert_eq!(latest.level, Level::Error);
}

#[tokio::test]
async fn test_run_keeps_snapshot_when_task_vanished() {
    let (server, controller, _notifications) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/t1/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(execution_json("e1", "ok")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let target = persisted("t1", "Backup");
    let state = controller.run(ViewState::default(), &target).await;

    assert!(state.tasks.is_empty());
    assert_eq!(state.selected_task_for_output, Some(target));
}

#[tokio::test]
async fn test_run_without_id_sends_nothing() {
    let (server, controller, notifications) = setup().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let draft = Task {
        name: "draft".to_string(),
        ..Task::default()
    };
    let state = controller.run(ViewState::default(), &draft).await;

    assert!(!state.loading);
    assert_eq!(
        notifications.latest().map(|n| n.title),
        Some("Execution Failed".to_string())
    );
}
