/*
[INPUT]:  Controller, notification ring, log buffer, UI settings
[OUTPUT]: AppState: view state plus table, paging, search, tab and modal state
[POS]:    TUI app state and controller action wrappers
[UPDATE]: When adding dashboard actions or UI-only state
*/

use ratatui::widgets::TableState;
use taskpanel::config::UiConfig;
use taskpanel::form::TaskForm;
use taskpanel::listing::{Pagination, SortOrder, sorted_rows};
use taskpanel::logging::LogBufferHandle;
use taskpanel::{ActiveView, Controller, Decision, NotificationCenter, ViewState};
use taskpanel_client::{Task, TaskClient};

use crate::tui::ui::modal::{ConfirmModal, TaskFormModal};

pub(super) type DashboardController = Controller<TaskClient, NotificationCenter>;

pub(super) enum ActiveModal {
    TaskForm(TaskFormModal),
    ConfirmDelete(ConfirmModal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Dashboard,
    Output,
    Logs,
}

#[derive(Debug, Default)]
pub(super) struct SearchInput {
    pub(super) editing: bool,
    pub(super) query: String,
}

pub(super) struct AppState {
    pub(super) controller: DashboardController,
    pub(super) notifications: NotificationCenter,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) view: ViewState,
    pub(super) table_state: TableState,
    pub(super) current_tab: Tab,
    pub(super) sort: SortOrder,
    pub(super) pagination: Pagination,
    pub(super) search: SearchInput,
    pub(super) active_modal: Option<ActiveModal>,
    pub(super) output_scroll: u16,
    pub(super) status_message: String,
    seen_notifications: usize,
}

impl AppState {
    pub(super) fn new(
        controller: DashboardController,
        notifications: NotificationCenter,
        log_buffer: LogBufferHandle,
        ui: &UiConfig,
    ) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            controller,
            notifications,
            log_buffer,
            view: ViewState::default(),
            table_state,
            current_tab: Tab::Dashboard,
            sort: SortOrder::default(),
            pagination: Pagination::new(ui.page_size),
            search: SearchInput::default(),
            active_modal: None,
            output_scroll: 0,
            status_message: "Ready".to_string(),
            seen_notifications: 0,
        }
    }

    /// Rows on the current page, in display order.
    pub(super) fn visible_tasks(&self) -> Vec<&Task> {
        let rows = sorted_rows(&self.view.tasks, self.sort);
        self.pagination.slice(&rows).to_vec()
    }

    pub(super) fn selected_task(&self) -> Option<Task> {
        let idx = self.table_state.selected()?;
        self.visible_tasks().get(idx).map(|task| (*task).clone())
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
        self.table_state.select(Some(next));
    }

    pub(super) fn next_page(&mut self) {
        self.pagination.next(self.view.tasks.len());
        self.table_state.select(Some(0));
        self.clamp_selection();
    }

    pub(super) fn prev_page(&mut self) {
        self.pagination.prev();
        self.table_state.select(Some(0));
        self.clamp_selection();
    }

    pub(super) fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    /// Cycle tabs. The view selector follows the tab so later reloads
    /// leave the user where they are; the output selection is kept.
    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Dashboard => Tab::Output,
            Tab::Output => Tab::Logs,
            Tab::Logs => Tab::Dashboard,
        };
        self.view.active_view = match self.current_tab {
            Tab::Output if self.view.selected_task_for_output.is_some() => ActiveView::Output,
            _ => ActiveView::List,
        };
    }

    pub(super) fn scroll_output(&mut self, delta: i32) {
        let next = (i32::from(self.output_scroll) + delta).max(0);
        self.output_scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    pub(super) fn open_create_form(&mut self) {
        self.view = std::mem::take(&mut self.view).open_create_form();
        self.active_modal = Some(ActiveModal::TaskForm(TaskFormModal::new(TaskForm::new())));
    }

    pub(super) fn open_edit_form(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "no task selected".to_string();
            return;
        };
        self.view = std::mem::take(&mut self.view).open_edit_form(&task);
        let form = TaskForm::for_task(self.view.editing_task.as_ref());
        self.active_modal = Some(ActiveModal::TaskForm(TaskFormModal::new(form)));
    }

    pub(super) fn open_delete_confirm(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "no task selected".to_string();
            return;
        };
        if !task.has_id() {
            self.status_message = format!("task \"{}\" has no id yet", task.name);
            return;
        }
        self.active_modal = Some(ActiveModal::ConfirmDelete(ConfirmModal::delete_task(task)));
    }

    pub(super) fn close_modal(&mut self) {
        if matches!(self.active_modal, Some(ActiveModal::TaskForm(_))) {
            self.view = std::mem::take(&mut self.view).close_form();
        }
        self.active_modal = None;
    }

    pub(super) fn active_modal_mut(&mut self) -> Option<&mut ActiveModal> {
        self.active_modal.as_mut()
    }

    pub(super) fn show_list(&mut self) {
        self.view = std::mem::take(&mut self.view).show_list();
        self.current_tab = Tab::Dashboard;
        self.output_scroll = 0;
    }

    pub(super) async fn reload(&mut self) {
        let state = std::mem::take(&mut self.view);
        self.view = self.controller.load(state).await;
        self.after_update();
    }

    pub(super) async fn submit_search(&mut self) {
        self.search.editing = false;
        let state = std::mem::take(&mut self.view);
        self.view = self.controller.search(state, &self.search.query).await;
        self.pagination = Pagination::new(self.pagination.page_size());
        self.table_state.select(Some(0));
        self.after_update();
    }

    /// Submit the open form. The modal stays open when validation or the
    /// request fails.
    pub(super) async fn submit_form(&mut self) {
        let draft = match self.active_modal_mut() {
            Some(ActiveModal::TaskForm(modal)) => modal.take_draft(),
            _ => return,
        };
        let Some(draft) = draft else {
            return;
        };
        let state = std::mem::take(&mut self.view);
        self.view = self.controller.submit_form(state, draft).await;
        if !self.view.form_open {
            self.active_modal = None;
        }
        self.after_update();
    }

    pub(super) async fn resolve_delete(&mut self, task: Task, mut decision: Decision) {
        self.active_modal = None;
        let state = std::mem::take(&mut self.view);
        self.view = self.controller.delete(state, &task, &mut decision).await;
        self.after_update();
    }

    /// First half of a run: show the output tab for `task` right away.
    pub(super) fn begin_run(&mut self, task: &Task) {
        self.view = std::mem::take(&mut self.view).begin_run(task);
        self.current_tab = Tab::Output;
        self.output_scroll = 0;
        self.status_message = format!("running \"{}\"...", task.name);
    }

    pub(super) async fn complete_run(&mut self, task: &Task) {
        let state = std::mem::take(&mut self.view);
        self.view = self.controller.complete_run(state, task).await;
        if self.view.active_view == ActiveView::Output {
            self.current_tab = Tab::Output;
        }
        self.after_update();
    }

    fn after_update(&mut self) {
        self.pagination.clamp(self.view.tasks.len());
        self.clamp_selection();
        self.sync_status();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        match (len, self.table_state.selected()) {
            (0, _) => self.table_state.select(None),
            (_, None) => self.table_state.select(Some(0)),
            (len, Some(idx)) if idx >= len => self.table_state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Show the newest notification on the status line, once.
    fn sync_status(&mut self) {
        let published = self.notifications.published();
        if published != self.seen_notifications {
            if let Some(latest) = self.notifications.latest() {
                self.status_message = latest.to_string();
            }
            self.seen_notifications = published;
        }
    }
}
