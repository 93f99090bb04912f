/*
[INPUT]:  ViewState, user actions, TaskApi implementation, Notify and Confirm front-end seams
[OUTPUT]: Next ViewState after each action, user notifications
[POS]:    View-state controller - mediates every API call and reconciles local state
[UPDATE]: When adding user actions or changing reconciliation rules
*/

use taskpanel_client::{NewTask, Task, TaskApi, TaskPatch};
use tracing::{debug, info, warn};

use crate::notify::{Confirm, ConfirmRequest, Decision, Notification, Notify};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    List,
    Output,
}

/// Everything the dashboard renders from.
///
/// `tasks` mirrors the last successful list/search; `loading` is set while a
/// request is outstanding but does not lock anything out, so a late response
/// simply overwrites the state (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub active_view: ActiveView,
    pub editing_task: Option<Task>,
    pub form_open: bool,
    pub selected_task_for_output: Option<Task>,
}

impl ViewState {
    pub fn open_create_form(mut self) -> Self {
        self.editing_task = None;
        self.form_open = true;
        self
    }

    pub fn open_edit_form(mut self, task: &Task) -> Self {
        self.editing_task = Some(task.clone());
        self.form_open = true;
        self
    }

    pub fn close_form(mut self) -> Self {
        self.editing_task = None;
        self.form_open = false;
        self
    }

    /// Back to the task list, dropping the output selection.
    pub fn show_list(mut self) -> Self {
        self.active_view = ActiveView::List;
        self.selected_task_for_output = None;
        self
    }

    /// Switch to the output view for `task` before its run request resolves.
    pub fn begin_run(mut self, task: &Task) -> Self {
        self.loading = true;
        self.selected_task_for_output = Some(task.clone());
        self.active_view = ActiveView::Output;
        self
    }

    /// Id of the task currently being edited, if the form is in edit mode.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_task
            .as_ref()
            .and_then(|task| task.require_id().ok())
    }

    fn replace_task(&mut self, updated: Task) {
        for task in self.tasks.iter_mut() {
            if task.same_identity(&updated) {
                *task = updated;
                return;
            }
        }
    }

    fn remove_task(&mut self, id: &str) {
        self.tasks.retain(|task| task.id.as_deref() != Some(id));
    }
}

/// Runs user actions against the API and folds the results into `ViewState`.
///
/// Every failure ends as a notification; nothing propagates to the caller.
pub struct Controller<A, N> {
    api: A,
    notifier: N,
}

impl<A: TaskApi, N: Notify> Controller<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self { api, notifier }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Reload the whole task list. On failure the previous list is kept.
    pub async fn load(&self, mut state: ViewState) -> ViewState {
        state.loading = true;
        match self.api.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "tasks loaded");
                state.tasks = tasks;
            }
            Err(err) => {
                warn!(error = %err, "load tasks failed");
                self.notifier.notify(Notification::error(
                    "Error",
                    "Failed to load tasks from the API.",
                ));
            }
        }
        state.loading = false;
        state
    }

    /// Search by name. A blank query reloads everything; a failed search
    /// clears the list instead of leaving stale results behind.
    pub async fn search(&self, mut state: ViewState, query: &str) -> ViewState {
        if query.trim().is_empty() {
            return self.load(state).await;
        }

        state.loading = true;
        match self.api.search(query).await {
            Ok(tasks) => {
                debug!(query = %query, count = tasks.len(), "search finished");
                state.tasks = tasks;
            }
            Err(err) => {
                warn!(query = %query, error = %err, "search failed");
                self.notifier
                    .notify(Notification::error("Error", "Failed to execute search."));
                state.tasks.clear();
            }
        }
        state.loading = false;
        state
    }

    /// Single submit handler for the form: edit when the form is bound to a
    /// persisted task, create otherwise.
    pub async fn submit_form(&self, state: ViewState, draft: NewTask) -> ViewState {
        match state.editing_id().map(str::to_string) {
            Some(id) => self.edit(state, &id, draft).await,
            None => self.create(state, draft).await,
        }
    }

    pub async fn create(&self, mut state: ViewState, draft: NewTask) -> ViewState {
        match self.api.create(&draft).await {
            Ok(created) => {
                info!(id = ?created.id, name = %created.name, "task created");
                self.notifier.notify(Notification::success(
                    "Success",
                    format!("Task \"{}\" created.", created.name),
                ));
                state.tasks.push(created);
                state.close_form()
            }
            Err(err) => {
                warn!(error = %err, "create task failed");
                self.notifier
                    .notify(Notification::error("Error", err.to_string()));
                state
            }
        }
    }

    pub async fn edit(&self, mut state: ViewState, id: &str, draft: NewTask) -> ViewState {
        match self.api.update(id, &TaskPatch::from(draft)).await {
            Ok(updated) => {
                info!(id = %id, name = %updated.name, "task updated");
                self.notifier.notify(Notification::success(
                    "Success",
                    format!("Task \"{}\" updated.", updated.name),
                ));
                state.replace_task(updated);
                state.close_form()
            }
            Err(err) => {
                warn!(id = %id, error = %err, "update task failed");
                self.notifier
                    .notify(Notification::error("Error", err.to_string()));
                state
            }
        }
    }

    /// Delete after an explicit confirmation. Tasks without an id are
    /// ignored without asking or sending anything.
    pub async fn delete<C>(&self, mut state: ViewState, task: &Task, confirm: &mut C) -> ViewState
    where
        C: Confirm + ?Sized,
    {
        let Ok(id) = task.require_id() else {
            warn!(name = %task.name, "refusing to delete a task without id");
            return state;
        };

        let request = ConfirmRequest::delete_task(&task.name);
        if confirm.confirm(&request).await == Decision::Cancelled {
            debug!(id = %id, "delete cancelled");
            return state;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                info!(id = %id, "task deleted");
                state.remove_task(id);
                self.notifier.notify(Notification::success(
                    "Success",
                    format!("Task \"{}\" deleted.", task.name),
                ));
            }
            Err(err) => {
                warn!(id = %id, error = %err, "delete task failed");
                self.notifier
                    .notify(Notification::error("Error", err.to_string()));
            }
        }
        state
    }

    /// Run the task's command and show its output.
    pub async fn run(&self, state: ViewState, task: &Task) -> ViewState {
        let state = state.begin_run(task);
        self.complete_run(state, task).await
    }

    /// Second half of `run`, for callers that render the in-progress view
    /// produced by `ViewState::begin_run` first.
    pub async fn complete_run(&self, mut state: ViewState, task: &Task) -> ViewState {
        let id = match task.require_id() {
            Ok(id) => id.to_string(),
            Err(err) => {
                warn!(name = %task.name, "refusing to run a task without id");
                self.notifier
                    .notify(Notification::error("Execution Failed", err.to_string()));
                state.loading = false;
                return state;
            }
        };

        state.loading = true;
        self.notifier.notify(Notification::info(
            "Executing Command",
            format!("Running command for task \"{}\"...", task.name),
        ));

        match self.api.run(&id).await {
            Ok(execution) => {
                info!(id = %id, execution = %execution.short_id(), "command executed");
                // The execution is appended server-side; reload to pick it up.
                state = self.load(state).await;
                self.notifier.notify(Notification::success(
                    "Command Complete",
                    format!("Execution ID: {}", execution.short_id()),
                ));
                if let Some(refreshed) = state.tasks.iter().find(|t| t.same_identity(task)) {
                    state.selected_task_for_output = Some(refreshed.clone());
                }
            }
            Err(err) => {
                warn!(id = %id, error = %err, "run task failed");
                self.notifier
                    .notify(Notification::error("Execution Failed", err.to_string()));
            }
        }
        state.loading = false;
        state
    }
}
