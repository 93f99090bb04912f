/*
[INPUT]:  Optional task being edited, user keystrokes into form fields
[OUTPUT]: Validated NewTask drafts and create/edit labels
[POS]:    Presentational model - task create/edit form
[UPDATE]: When form fields or validation rules change
*/

use taskpanel_client::{NewTask, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Command,
    Owner,
    ServerName,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Command,
        FormField::Owner,
        FormField::ServerName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Task Name",
            FormField::Command => "Command",
            FormField::Owner => "Owner",
            FormField::ServerName => "Server Name",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "e.g., Daily Database Backup",
            FormField::Command => "e.g., echo 'Backup complete'",
            FormField::Owner => "e.g., John Doe",
            FormField::ServerName => "e.g., prod-server-1",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            FormField::Name => "Please enter the task name",
            FormField::Command => "Please enter the command to execute",
            FormField::Owner => "Please specify the task owner",
            FormField::ServerName => "Please specify the server name",
        }
    }
}

/// Form values bound either to empty defaults (create) or to a task (edit).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskForm {
    pub name: String,
    pub command: String,
    pub owner: String,
    pub server_name: String,
    editing: bool,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            command: task.command.clone(),
            owner: task.owner.clone(),
            server_name: task.server_name.clone(),
            editing: task.has_id(),
        }
    }

    /// Create-mode form, or edit-mode when bound to a persisted task
    pub fn for_task(task: Option<&Task>) -> Self {
        task.map(Self::from_task).unwrap_or_default()
    }

    pub fn is_edit(&self) -> bool {
        self.editing
    }

    pub fn title(&self) -> &'static str {
        if self.editing { "Edit Task" } else { "Create New Task" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing { "Save Changes" } else { "Create Task" }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Command => &self.command,
            FormField::Owner => &self.owner,
            FormField::ServerName => &self.server_name,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Command => &mut self.command,
            FormField::Owner => &mut self.owner,
            FormField::ServerName => &mut self.server_name,
        }
    }

    /// First field that blocks submission, if any.
    pub fn missing_field(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|field| self.value(*field).trim().is_empty())
    }

    /// Validated request body, or the message of the first blank field.
    pub fn to_draft(&self) -> Result<NewTask, String> {
        if let Some(field) = self.missing_field() {
            return Err(field.required_message().to_string());
        }
        Ok(NewTask::new(
            self.name.clone(),
            self.command.clone(),
            self.owner.clone(),
            self.server_name.clone(),
        ))
    }
}
