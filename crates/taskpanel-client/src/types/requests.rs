/*
[INPUT]:  Task API request schema and serde requirements
[OUTPUT]: Typed request bodies for create and update calls
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::Task;

/// Body of a create call: a task without id or execution history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub command: String,
    pub owner: String,
    pub server_name: String,
}

impl NewTask {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        owner: impl Into<String>,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            owner: owner.into(),
            server_name: server_name.into(),
        }
    }
}

impl From<&Task> for NewTask {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            command: task.command.clone(),
            owner: task.owner.clone(),
            server_name: task.server_name.clone(),
        }
    }
}

/// Body of an update call; absent fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
}

impl From<NewTask> for TaskPatch {
    fn from(task: NewTask) -> Self {
        Self {
            name: Some(task.name),
            command: Some(task.command),
            owner: Some(task.owner),
            server_name: Some(task.server_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = TaskPatch {
            owner: Some("Jo".to_string()),
            ..TaskPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).expect("encode"),
            serde_json::json!({ "owner": "Jo" })
        );
    }

    #[test]
    fn test_full_patch_from_new_task() {
        let patch = TaskPatch::from(NewTask::new("Backup", "echo hi", "Jo", "srv1"));
        assert_eq!(
            serde_json::to_value(&patch).expect("encode"),
            serde_json::json!({
                "name": "Backup",
                "command": "echo hi",
                "owner": "Jo",
                "serverName": "srv1"
            })
        );
    }
}
