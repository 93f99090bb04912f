/*
[INPUT]:  Task ids, create/update bodies, search text
[OUTPUT]: Tasks and execution records decoded from the task API
[POS]:    HTTP layer - /tasks endpoints
[UPDATE]: When adding new task endpoints or changing status handling
*/

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::{Result, TaskApi, TaskApiError, TaskClient};
use crate::types::{NewTask, Task, TaskExecution, TaskPatch};

const TASKS: &str = "tasks";

impl TaskClient {
    /// List all tasks
    ///
    /// GET /tasks
    pub async fn list(&self) -> Result<Vec<Task>> {
        let builder = self.request(Method::GET, &[TASKS])?;
        let response = builder.send().await.map_err(TaskApiError::fetch_transport)?;
        if !response.status().is_success() {
            return Err(TaskApiError::fetch_status(response.status()));
        }
        decode(response).await
    }

    /// Search tasks by name
    ///
    /// GET /tasks/search?name={name}
    pub async fn search(&self, name: &str) -> Result<Vec<Task>> {
        let builder = self
            .request(Method::GET, &[TASKS, "search"])?
            .query(&[("name", name)]);
        let response = builder.send().await.map_err(TaskApiError::fetch_transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(name = %name, "search returned 404; treating as no matches");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(TaskApiError::fetch_status(status));
        }
        decode(response).await
    }

    /// Create a new task
    ///
    /// POST /tasks, expects 201 Created
    pub async fn create(&self, task: &NewTask) -> Result<Task> {
        let builder = self.request(Method::POST, &[TASKS])?.json(task);
        let response = send(builder).await?;
        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskApiError::Create {
                status: status.as_u16(),
                body,
            });
        }
        decode(response).await
    }

    /// Update an existing task
    ///
    /// PUT /tasks/{id}
    pub async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let id = checked_id(id)?;
        let builder = self.request(Method::PUT, &[TASKS, id])?.json(patch);
        let response = send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskApiError::Update {
                status: status.as_u16(),
                body,
            });
        }
        decode(response).await
    }

    /// Delete a task
    ///
    /// DELETE /tasks/{id}, expects 204 No Content
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = checked_id(id)?;
        let builder = self.request(Method::DELETE, &[TASKS, id])?;
        let response = send(builder).await?;
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskApiError::Delete {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Run the task command on the server
    ///
    /// PUT /tasks/{id}/run
    pub async fn run(&self, id: &str) -> Result<TaskExecution> {
        let id = checked_id(id)?;
        let builder = self
            .request(Method::PUT, &[TASKS, id, "run"])?
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let response = send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskApiError::Run {
                status: status.as_u16(),
                body,
            });
        }
        decode(response).await
    }
}

#[async_trait]
impl TaskApi for TaskClient {
    async fn list(&self) -> Result<Vec<Task>> {
        TaskClient::list(self).await
    }

    async fn search(&self, name: &str) -> Result<Vec<Task>> {
        TaskClient::search(self, name).await
    }

    async fn create(&self, task: &NewTask) -> Result<Task> {
        TaskClient::create(self, task).await
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        TaskClient::update(self, id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        TaskClient::delete(self, id).await
    }

    async fn run(&self, id: &str) -> Result<TaskExecution> {
        TaskClient::run(self, id).await
    }
}

fn checked_id(id: &str) -> Result<&str> {
    if id.is_empty() {
        return Err(TaskApiError::MissingId);
    }
    Ok(id)
}

async fn send(builder: RequestBuilder) -> Result<Response> {
    Ok(builder.send().await?)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
