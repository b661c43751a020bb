//! Enrollment
//!
//! The checkout button: ask the gateway for a hosted checkout page and leave
//! the application for it. No payment logic lives here.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::error::NavigationError;
use crate::format::format_price;
use crate::gateway::CourseGateway;
use crate::model::CourseId;
use crate::notify::{Notification, NotificationSink};

/// Failure toast for the enroll button
pub const ENROLL_FAILURE: &str = "Something went wrong";

/// Full-page navigation away from the app
pub trait Navigator: Send + Sync {
    fn assign(&self, url: &str) -> Result<(), NavigationError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// Navigation to the checkout page was started
    Redirected(String),
    /// No redirect target could be obtained or followed
    Failed,
    /// A checkout request is already pending
    Rejected,
}

/// Loading flag released on every exit path
struct LoadingGuard<'a> {
    loading: &'a watch::Sender<bool>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.send_if_modified(|busy| std::mem::replace(busy, false));
    }
}

pub struct Enrollment {
    course_id: CourseId,
    price: Decimal,
    loading: watch::Sender<bool>,
    gateway: Arc<dyn CourseGateway>,
    notifier: Arc<dyn NotificationSink>,
    navigator: Arc<dyn Navigator>,
}

impl Enrollment {
    pub fn new(
        course_id: CourseId,
        price: Decimal,
        gateway: Arc<dyn CourseGateway>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            course_id,
            price,
            loading: watch::Sender::new(false),
            gateway,
            notifier,
            navigator,
        }
    }

    /// Button text, e.g. "Enroll for $19.99"
    pub fn label(&self) -> String {
        format!("Enroll for {}", format_price(self.price))
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub async fn enroll(&self) -> EnrollOutcome {
        let acquired = self.loading.send_if_modified(|busy| !std::mem::replace(busy, true));
        if !acquired {
            tracing::debug!(course = %self.course_id, "checkout already pending");
            return EnrollOutcome::Rejected;
        }
        let _release = LoadingGuard {
            loading: &self.loading,
        };

        let url = match self.gateway.checkout(&self.course_id).await {
            Ok(session) if !session.url.is_empty() => session.url,
            Ok(_) => {
                tracing::error!(course = %self.course_id, "checkout returned no url");
                return self.fail();
            }
            Err(err) => {
                tracing::error!(course = %self.course_id, error = %err, "checkout failed");
                return self.fail();
            }
        };

        if let Err(err) = self.navigator.assign(&url) {
            tracing::error!(course = %self.course_id, error = %err, "redirect failed");
            return self.fail();
        }
        tracing::info!(course = %self.course_id, "redirecting to checkout");
        EnrollOutcome::Redirected(url)
    }

    fn fail(&self) -> EnrollOutcome {
        self.notifier.notify(Notification::error(ENROLL_FAILURE));
        EnrollOutcome::Failed
    }
}
