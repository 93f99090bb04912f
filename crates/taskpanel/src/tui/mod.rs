/*
[INPUT]:  Controller bound to the task API, notification ring, log buffer, UI settings
[OUTPUT]: Ratatui dashboard for listing, editing, running and deleting tasks
[POS]:    TUI module for the taskpanel binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::run_dashboard;
