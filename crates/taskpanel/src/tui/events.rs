/*
[INPUT]:  Crossterm key codes, AppState
[OUTPUT]: Controller actions routed from keys; quit and deferred-run signals
[POS]:    TUI event routing
[UPDATE]: When changing keybindings or modal input handling
*/

use crossterm::event::KeyCode;
use taskpanel_client::Task;

use super::app::{ActiveModal, AppState, Tab};
use super::ui::modal::ModalAction;

/// What the run loop should do after a key.
#[derive(Debug, PartialEq)]
pub(super) enum KeyOutcome {
    Continue,
    Quit,
    /// Draw the in-progress output view, then await the run.
    Run(Task),
}

/// Handles key events for the TUI.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyCode) -> KeyOutcome {
    if app.active_modal.is_some() {
        handle_modal_key_event(app, key).await;
        return KeyOutcome::Continue;
    }

    if app.search.editing {
        handle_search_key(app, key).await;
        return KeyOutcome::Continue;
    }

    match key {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Tab => app.next_tab(),
        KeyCode::Char('r') => app.reload().await,
        KeyCode::Char('b') => app.show_list(),
        KeyCode::Up if app.current_tab == Tab::Output => app.scroll_output(-1),
        KeyCode::Down if app.current_tab == Tab::Output => app.scroll_output(1),
        KeyCode::PageUp if app.current_tab == Tab::Output => app.scroll_output(-10),
        KeyCode::PageDown if app.current_tab == Tab::Output => app.scroll_output(10),
        _ if app.current_tab == Tab::Dashboard => return handle_dashboard_key(app, key),
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_dashboard_key(app: &mut AppState, key: KeyCode) -> KeyOutcome {
    match key {
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Char('[') => app.prev_page(),
        KeyCode::Char(']') => app.next_page(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('/') => app.search.editing = true,
        KeyCode::Char('n') => app.open_create_form(),
        // row actions wait for the outstanding request
        KeyCode::Char('e' | 'd' | 'x') if app.view.loading => {
            app.status_message = "busy, try again".to_string();
        }
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') => app.open_delete_confirm(),
        KeyCode::Char('x') => match app.selected_task() {
            Some(task) => return KeyOutcome::Run(task),
            None => app.status_message = "no task selected".to_string(),
        },
        _ => {}
    }
    KeyOutcome::Continue
}

async fn handle_search_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Enter => app.submit_search().await,
        KeyCode::Esc => app.search.editing = false,
        KeyCode::Backspace => {
            app.search.query.pop();
        }
        KeyCode::Char(ch) => app.search.query.push(ch),
        _ => {}
    }
}

async fn handle_modal_key_event(app: &mut AppState, key: KeyCode) {
    match app.active_modal_mut() {
        Some(ActiveModal::TaskForm(modal)) => match modal.handle_key(key) {
            ModalAction::Submit => app.submit_form().await,
            ModalAction::Cancel => app.close_modal(),
            ModalAction::None => {}
        },
        Some(ActiveModal::ConfirmDelete(modal)) => {
            if let Some(decision) = modal.handle_key(key) {
                let task = modal.task().clone();
                app.resolve_delete(task, decision).await;
            }
        }
        None => {}
    }
}
