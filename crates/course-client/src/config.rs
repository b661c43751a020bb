//! Client configuration

use course_core::{CourseError, Result};

/// Where the course API lives
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Origin of the API, without trailing slash, e.g. `http://localhost:3000`
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CourseError::Config(format!(
                "base url must be http(s), got {base_url:?}"
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Reads `COURSE_API_URL`, falling back to the default origin
    pub fn from_env() -> Result<Self> {
        match std::env::var("COURSE_API_URL") {
            Ok(url) => Self::new(url),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
