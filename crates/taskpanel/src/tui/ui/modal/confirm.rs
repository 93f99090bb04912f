/*
[INPUT]:  Confirmation request for a destructive action, key events
[OUTPUT]: Yes/no modal resolving to a Decision
[POS]:    TUI UI modal for delete confirmation
[UPDATE]: When changing confirmation wording or shortcuts
*/

use crossterm::event::KeyCode;
use taskpanel::{ConfirmRequest, Decision};
use taskpanel_client::Task;

use super::{Field, Modal, ModalAction, handle_modal_key};

pub(in crate::tui) struct ConfirmModal {
    task: Task,
    request: ConfirmRequest,
    focus_index: usize,
}

impl ConfirmModal {
    pub(in crate::tui) fn delete_task(task: Task) -> Self {
        let request = ConfirmRequest::delete_task(&task.name);
        Self {
            task,
            request,
            // default to the safe button
            focus_index: 2,
        }
    }

    pub(in crate::tui) fn task(&self) -> &Task {
        &self.task
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        Modal {
            title: self.request.title.clone(),
            focus_index: self.focus_index,
            fields: vec![
                Field::Text(self.request.content.clone()),
                Field::Button {
                    label: format!("{} (y)", self.request.confirm_label),
                    action: ModalAction::Submit,
                },
                Field::Button {
                    label: format!("{} (n)", self.request.cancel_label),
                    action: ModalAction::Cancel,
                },
            ],
            error: None,
        }
    }

    /// `Some` once the user has answered.
    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> Option<Decision> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => return Some(Decision::Confirmed),
            KeyCode::Char('n') | KeyCode::Char('N') => return Some(Decision::Cancelled),
            _ => {}
        }
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.focus_index = modal.focus_index;
        match action {
            ModalAction::Submit => Some(Decision::Confirmed),
            ModalAction::Cancel => Some(Decision::Cancelled),
            ModalAction::None => None,
        }
    }
}
