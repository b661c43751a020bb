//! # course-core
//!
//! Inline-editable fields for course authoring, and the enroll button.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        FieldController<K>                        │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────────────┐  │
//! │  │ FieldKind   │  │ CourseGate- │  │ NotificationSink         │  │
//! │  │ (validate)  │──│ way (PATCH) │──│ + RefreshTrigger         │  │
//! │  └─────────────┘  └─────────────┘  └──────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation always runs to completion before the gateway is called, and a
//! field never has more than one update in flight.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use course_core::{FieldController, ResourcePath, Services, validation::Price};
//!
//! let price = FieldController::<Price>::new(ResourcePath::course(id), None, services);
//! price.begin_edit();
//! price.set_draft("19.99".into());
//! price.submit().await;
//! ```

pub mod controller;
pub mod enroll;
pub mod error;
pub mod format;
pub mod gateway;
pub mod model;
pub mod notify;
pub mod store;
pub mod validation;

pub use controller::{FieldController, FieldState, Mode, Rejection, Services, SubmitOutcome};
pub use enroll::{EnrollOutcome, Enrollment, Navigator};
pub use error::{CourseError, NavigationError, Result, TransportError, ValidationError};
pub use format::{Display, format_price};
pub use gateway::{CourseGateway, MockGateway};
pub use model::{
    ChapterId, ChapterSnapshot, CheckoutSession, CourseId, CourseSnapshot, Patch, ResourcePath,
    Scope, UpdateRequest,
};
pub use notify::{
    Notification, NotificationKind, NotificationSink, RefreshTrigger, SharedToasts, ToastQueue,
};
pub use store::ConfettiStore;
pub use validation::FieldKind;
