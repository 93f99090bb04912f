/*
[INPUT]:  TaskForm values and key events
[OUTPUT]: Create/edit task modal, validated request body on submit
[POS]:    TUI UI modal for the task form
[UPDATE]: When adding task fields or changing form validation display
*/

use crossterm::event::KeyCode;
use taskpanel::form::{FormField, TaskForm};
use taskpanel_client::NewTask;

use super::{Field, Modal, ModalAction, handle_modal_key};

pub(in crate::tui) struct TaskFormModal {
    form: TaskForm,
    focus_index: usize,
    error: Option<String>,
}

impl TaskFormModal {
    pub(in crate::tui) fn new(form: TaskForm) -> Self {
        Self {
            form,
            focus_index: 0,
            error: None,
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        let mut fields: Vec<Field> = FormField::ALL
            .into_iter()
            .map(|field| Field::TextInput {
                label: field.label().to_string(),
                value: self.form.value(field).to_string(),
                placeholder: field.placeholder().to_string(),
            })
            .collect();
        fields.push(Field::Button {
            label: self.form.submit_label().to_string(),
            action: ModalAction::Submit,
        });
        fields.push(Field::Button {
            label: String::from("Cancel"),
            action: ModalAction::Cancel,
        });

        Modal {
            title: self.form.title().to_string(),
            focus_index: self.focus_index,
            fields,
            error: self.error.clone(),
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);
        action
    }

    /// Validated body; on failure the message is kept for display.
    pub(in crate::tui) fn take_draft(&mut self) -> Option<NewTask> {
        match self.form.to_draft() {
            Ok(draft) => {
                self.error = None;
                Some(draft)
            }
            Err(message) => {
                if let Some(field) = self.form.missing_field() {
                    self.focus_index = field_index(field);
                }
                self.error = Some(message);
                None
            }
        }
    }

    fn apply_modal_state(&mut self, modal: &Modal) {
        self.focus_index = modal.focus_index;
        for (index, field) in FormField::ALL.into_iter().enumerate() {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get(index) {
                if self.form.value(field) != value {
                    *self.form.value_mut(field) = value.clone();
                    self.error = None;
                }
            }
        }
    }
}

fn field_index(field: FormField) -> usize {
    FormField::ALL
        .iter()
        .position(|candidate| *candidate == field)
        .unwrap_or(0)
}
