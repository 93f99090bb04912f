/*
[INPUT]:  TUI app state for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels or modals
*/

mod layout;
mod logs;
mod output;
mod task_list;

pub mod modal;

pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use output::draw_output;
pub(in crate::tui) use task_list::{draw_search_bar, draw_task_detail, draw_task_list};
