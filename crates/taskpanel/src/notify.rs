/*
[INPUT]:  Controller outcomes (success, failure, progress) and confirmation prompts
[OUTPUT]: Notification sinks and asynchronous confirmation decisions
[POS]:    User feedback seam between controller and front ends
[UPDATE]: When adding notification kinds or new sinks
*/

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

pub const NOTIFICATION_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Error => "error",
        };
        f.write_str(label)
    }
}

/// A user-visible message with a short title and a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Info, title, description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Error, title, description)
    }

    fn new(level: Level, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Sink for user-visible notifications.
pub trait Notify: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Bounded ring of recent notifications, shared between the controller and
/// whatever renders the status line.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Ring>>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Ring {
    entries: VecDeque<Notification>,
    published: usize,
}

impl NotificationCenter {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Ring::default())),
            capacity,
        }
    }

    fn ring(&self) -> MutexGuard<'_, Ring> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn latest(&self) -> Option<Notification> {
        self.ring().entries.back().cloned()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.ring().entries.iter().cloned().collect()
    }

    /// Count of notifications ever published, including evicted ones.
    pub fn published(&self) -> usize {
        self.ring().published
    }

    pub fn has_errors(&self) -> bool {
        self.ring()
            .entries
            .iter()
            .any(|notification| notification.level == Level::Error)
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NOTIFICATION_CAPACITY)
    }
}

impl Notify for NotificationCenter {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => {
                tracing::warn!(title = %notification.title, "{}", notification.description)
            }
            _ => tracing::info!(title = %notification.title, "{}", notification.description),
        }
        let mut ring = self.ring();
        ring.published += 1;
        if self.capacity == 0 {
            return;
        }
        if ring.entries.len() >= self.capacity {
            ring.entries.pop_front();
        }
        ring.entries.push_back(notification);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// What the user is asked before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub content: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmRequest {
    pub fn delete_task(name: &str) -> Self {
        Self {
            title: format!("Are you sure you want to delete task \"{name}\"?"),
            content: "This action cannot be undone.".to_string(),
            confirm_label: "Yes, Delete".to_string(),
            cancel_label: "No".to_string(),
        }
    }
}

/// A confirmation dialog, resolved asynchronously into a decision.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, request: &ConfirmRequest) -> Decision;
}

/// An already-answered dialog: the front end collected the decision itself.
#[async_trait]
impl Confirm for Decision {
    async fn confirm(&mut self, _request: &ConfirmRequest) -> Decision {
        *self
    }
}
