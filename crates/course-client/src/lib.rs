//! # course-client
//!
//! HTTP persistence gateway for the course API.
//!
//! | call | method | path |
//! |---|---|---|
//! | field update | `PATCH` | `/api/courses/{courseId}[/chapters/{chapterId}]` |
//! | enroll | `POST` | `/api/courses/{courseId}/checkout` |
//! | refresh | `GET` | `/api/courses/{courseId}[/chapters/{chapterId}]` |
//!
//! Every non-2xx answer, transport failure or unreadable body becomes a
//! [`course_core::TransportError`].

mod config;
mod http;

pub use config::ClientConfig;
pub use http::HttpGateway;
