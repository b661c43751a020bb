//! Confetti Store
//!
//! Open/closed flag for the celebration overlay. Passed explicitly (Leptos
//! context on the web) instead of living in a global.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable handle; every clone sees the same flag
#[derive(Clone, Debug)]
pub struct ConfettiStore {
    open: Arc<watch::Sender<bool>>,
}

impl Default for ConfettiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfettiStore {
    pub fn new() -> Self {
        Self {
            open: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn open(&self) {
        self.open.send_if_modified(|open| !std::mem::replace(open, true));
    }

    pub fn close(&self) {
        self.open.send_if_modified(|open| std::mem::replace(open, false));
    }

    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.open.subscribe()
    }
}
