//! Persistence Gateway
//!
//! Translates update and checkout requests into remote calls and collapses
//! every non-success outcome into a [`TransportError`].

mod mock;

pub use mock::MockGateway;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::{CheckoutSession, CourseId, UpdateRequest};

/// Remote course API (Strategy pattern)
///
/// The gateway never touches field state or notifications, and does not
/// serialize calls itself: callers keep at most one request in flight.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CourseGateway: Send + Sync {
    /// Send a partial update
    async fn update(&self, request: &UpdateRequest) -> Result<(), TransportError>;

    /// Ask for a hosted checkout page for a course
    async fn checkout(&self, course_id: &CourseId) -> Result<CheckoutSession, TransportError>;
}
