/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: When adding field kinds or changing modal focus handling
*/

mod confirm;
mod task_form;

pub(in crate::tui) use confirm::ConfirmModal;
pub(in crate::tui) use task_form::TaskFormModal;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::runtime::border_style;

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
    /// Shown under the fields in red, e.g. a validation message
    pub(super) error: Option<String>,
}

pub(in crate::tui) enum Field {
    TextInput {
        label: String,
        value: String,
        placeholder: String,
    },
    Text(String),
    Button {
        label: String,
        action: ModalAction,
    },
}

impl Field {
    fn focusable(&self) -> bool {
        !matches!(self, Field::Text(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    Cancel,
    None,
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (index, field) in modal.fields.iter().enumerate() {
        let focused = index == modal.focus_index;
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let line = match field {
            Field::TextInput {
                label,
                value,
                placeholder,
            } => {
                let shown = if value.is_empty() && !focused {
                    Span::styled(placeholder.clone(), Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(value.clone(), style)
                };
                Line::from(vec![Span::raw(format!("{label}: ")), shown])
            }
            Field::Text(text) => Line::from(Span::raw(text.clone())),
            Field::Button { label, .. } => Line::from(Span::styled(format!("[{label}]"), style)),
        };
        lines.push(line);
        lines.push(Line::default());
    }
    if let Some(error) = modal.error.as_deref() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn move_focus(modal: &mut Modal, forward: bool) {
    let len = modal.fields.len();
    if len == 0 {
        return;
    }
    let mut index = modal.focus_index;
    for _ in 0..len {
        index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if modal.fields[index].focusable() {
            modal.focus_index = index;
            return;
        }
    }
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            move_focus(modal, true);
            ModalAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            move_focus(modal, false);
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.push(ch);
            }
            ModalAction::None
        }
        KeyCode::Enter => match modal.fields.get(modal.focus_index) {
            Some(Field::Button { action, .. }) => *action,
            // Enter in a text field jumps to the next one
            Some(Field::TextInput { .. }) => {
                move_focus(modal, true);
                ModalAction::None
            }
            _ => ModalAction::None,
        },
        _ => ModalAction::None,
    }
}
