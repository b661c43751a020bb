//! Mock Gateway
//!
//! For tests and offline demos. Records every call and answers from a script.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::CourseGateway;
use crate::error::TransportError;
use crate::model::{CheckoutSession, CourseId, UpdateRequest};

/// In-memory gateway with scripted outcomes
pub struct MockGateway {
    updates: Mutex<Vec<UpdateRequest>>,
    checkouts: Mutex<Vec<CourseId>>,
    fail: AtomicBool,
    checkout_url: Mutex<String>,
    /// When set, every call parks here until notified
    hold: Option<Arc<Notify>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
            checkouts: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
            checkout_url: Mutex::new("https://checkout.example.com/session".into()),
            hold: None,
        }
    }

    /// Every call fails with a 500
    pub fn failing() -> Self {
        let gateway = Self::new();
        gateway.set_failing(true);
        gateway
    }

    /// Calls wait for `release.notify_one()` before answering
    pub fn held(release: Arc<Notify>) -> Self {
        Self {
            hold: Some(release),
            ..Self::new()
        }
    }

    pub fn with_checkout_url(self, url: impl Into<String>) -> Self {
        if let Ok(mut current) = self.checkout_url.lock() {
            *current = url.into();
        }
        self
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Update requests received so far
    pub fn updates(&self) -> Vec<UpdateRequest> {
        self.updates.lock().map(|u| u.clone()).unwrap_or_default()
    }

    /// Checkout requests received so far
    pub fn checkouts(&self) -> Vec<CourseId> {
        self.checkouts.lock().map(|c| c.clone()).unwrap_or_default()
    }

    async fn answer(&self) -> Result<(), TransportError> {
        if let Some(release) = &self.hold {
            release.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            Err(TransportError::Status(500))
        } else {
            Ok(())
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CourseGateway for MockGateway {
    async fn update(&self, request: &UpdateRequest) -> Result<(), TransportError> {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(request.clone());
        }
        self.answer().await
    }

    async fn checkout(&self, course_id: &CourseId) -> Result<CheckoutSession, TransportError> {
        if let Ok(mut checkouts) = self.checkouts.lock() {
            checkouts.push(course_id.clone());
        }
        self.answer().await?;

        let url = self
            .checkout_url
            .lock()
            .map(|url| url.clone())
            .map_err(|e| TransportError::Malformed(e.to_string()))?;
        Ok(CheckoutSession { url })
    }
}
