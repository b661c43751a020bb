//! Notification Sink and Refresh Trigger
//!
//! Both are one-way side channels: the controllers fire them and never look
//! at a result.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generic message for every failed remote call
pub const GENERIC_FAILURE: &str = "Something went wrong!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// How long a toast of this kind stays on screen
    pub fn duration(&self) -> Duration {
        match self {
            NotificationKind::Success => Duration::seconds(2),
            NotificationKind::Error => Duration::seconds(4),
        }
    }
}

/// A transient toast
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Receives user-facing feedback
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        self(notification);
    }
}

/// Tells the hosting page to re-fetch server-derived state
pub trait RefreshTrigger: Send + Sync {
    fn refresh(&self);
}

impl<F> RefreshTrigger for F
where
    F: Fn() + Send + Sync,
{
    fn refresh(&self) {
        self();
    }
}

/// FIFO of toasts; only the front one is visible
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    pending: VecDeque<Notification>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }

    /// The toast currently on screen
    pub fn visible(&self) -> Option<&Notification> {
        self.pending.front()
    }

    /// Remove the visible toast, revealing the next one
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }
}

/// Thread-safe handle to a [`ToastQueue`], usable as a sink
#[derive(Clone, Debug, Default)]
pub struct SharedToasts {
    inner: Arc<Mutex<ToastQueue>>,
}

impl SharedToasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the queue as it is now
    pub fn snapshot(&self) -> ToastQueue {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything queued so far
    pub fn drain(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .drain(..)
            .collect()
    }
}

impl NotificationSink for SharedToasts {
    fn notify(&self, notification: Notification) {
        // a panic elsewhere must not swallow later toasts
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
