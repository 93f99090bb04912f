/*
[INPUT]:  Task API operations required by callers
[OUTPUT]: TaskApi trait implemented by TaskClient and test doubles
[POS]:    HTTP layer - seam between callers and the transport
[UPDATE]: When the set of task operations changes
*/

use async_trait::async_trait;

use crate::http::Result;
use crate::types::{NewTask, Task, TaskExecution, TaskPatch};

/// Operations exposed by the remote task API.
///
/// Every call is a single round trip: no retries, no batching.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// All tasks in server order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Tasks whose name matches `name`; a 404 answer means no matches
    async fn search(&self, name: &str) -> Result<Vec<Task>>;

    /// Create a task and return it with its server-assigned id
    async fn create(&self, task: &NewTask) -> Result<Task>;

    /// Update the editable fields of a task
    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task>;

    /// Delete a task
    async fn delete(&self, id: &str) -> Result<()>;

    /// Execute the task command remotely and return the new execution record
    async fn run(&self, id: &str) -> Result<TaskExecution>;

    /// Legacy variant: replace only the command of a task
    async fn update_command(&self, id: &str, command: &str) -> Result<Task> {
        let patch = TaskPatch {
            command: Some(command.to_string()),
            ..TaskPatch::default()
        };
        self.update(id, &patch).await
    }
}
