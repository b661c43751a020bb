//! Error Types

use thiserror::Error;

/// Result type alias for course operations
pub type Result<T> = std::result::Result<T, CourseError>;

/// Field-scoped validation failure. Never leaves the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {}", .reasons.join(", "))]
pub struct ValidationError {
    /// Wire name of the offending field
    pub field: &'static str,

    /// Human readable reasons, shown next to the field
    pub reasons: Vec<String>,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reasons: vec![reason.into()],
        }
    }
}

/// Failure of a remote call. The UI collapses all of these into one
/// generic message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, aborted request
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// The browser refused to leave the page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Navigation failed: {0}")]
pub struct NavigationError(pub String);

/// Umbrella error for the course crates
#[derive(Error, Debug)]
pub enum CourseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CourseError {
    /// Message safe to show to the user. Transport detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            CourseError::Validation(err) => err.reasons.join(", "),
            CourseError::Transport(_) | CourseError::Navigation(_) | CourseError::Json(_) => {
                "Something went wrong!".into()
            }
            CourseError::Config(_) => "Service configuration error.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_detail_is_hidden() {
        let err = CourseError::from(TransportError::Status(500));
        assert_eq!(err.user_message(), "Something went wrong!");
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_validation_message_is_shown() {
        let err = CourseError::from(ValidationError::new("title", "Title is required"));
        assert_eq!(err.user_message(), "Title is required");
        assert_eq!(err.to_string(), "title: Title is required");
    }
}
