/*
[INPUT]:  Public API exports for the taskpanel crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod controller;
pub mod form;
pub mod listing;
pub mod logging;
pub mod notify;
pub mod output;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use controller::{ActiveView, Controller, ViewState};
pub use notify::{Confirm, ConfirmRequest, Decision, Notification, NotificationCenter, Notify};
