//! HTTP Gateway
//!
//! `reqwest` implementation of [`CourseGateway`], plus the read endpoints a
//! hosting page re-fetches after a commit.

use async_trait::async_trait;
use course_core::{
    ChapterId, ChapterSnapshot, CheckoutSession, CourseGateway, CourseId, CourseSnapshot,
    ResourcePath, Result, TransportError, UpdateRequest,
};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

/// Course API over HTTP
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current server state of a course
    pub async fn course(&self, course_id: &CourseId) -> std::result::Result<CourseSnapshot, TransportError> {
        let path = ResourcePath::course(course_id.clone()).to_string();
        self.get(&path).await
    }

    /// Current server state of a chapter
    pub async fn chapter(
        &self,
        course_id: &CourseId,
        chapter_id: &ChapterId,
    ) -> std::result::Result<ChapterSnapshot, TransportError> {
        let path = ResourcePath::chapter(course_id.clone(), chapter_id.clone()).to_string();
        self.get(&path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, TransportError> {
        tracing::debug!(%path, "GET");
        let response = self
            .client
            .get(self.config.url(path))
            .send()
            .await
            .map_err(network)?;
        read_json(check_status(path, response)?).await
    }
}

fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

fn check_status(
    path: &str,
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(%path, status = status.as_u16(), "request rejected");
        Err(TransportError::Status(status.as_u16()))
    }
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> std::result::Result<T, TransportError> {
    let body = response.bytes().await.map_err(network)?;
    serde_json::from_slice(&body).map_err(|e| TransportError::Malformed(e.to_string()))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CourseGateway for HttpGateway {
    async fn update(&self, request: &UpdateRequest) -> std::result::Result<(), TransportError> {
        let path = request.path.to_string();
        tracing::debug!(%path, "PATCH");

        let response = self
            .client
            .patch(self.config.url(&path))
            .json(&request.patch)
            .send()
            .await
            .map_err(network)?;
        check_status(&path, response)?;
        Ok(())
    }

    async fn checkout(&self, course_id: &CourseId) -> std::result::Result<CheckoutSession, TransportError> {
        let path = ResourcePath::checkout(course_id);
        tracing::debug!(%path, "POST");

        let response = self
            .client
            .post(self.config.url(&path))
            .send()
            .await
            .map_err(network)?;
        read_json(check_status(&path, response)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::{get, patch, post},
    };
    use course_core::{FieldController, Patch, Services, SharedToasts, SubmitOutcome, validation::Price};
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    type Received = Arc<Mutex<Vec<(String, Value)>>>;

    async fn patch_course(
        State(received): State<Received>,
        Path(course_id): Path<String>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        received.lock().unwrap().push((format!("course:{course_id}"), body));
        StatusCode::OK
    }

    async fn patch_chapter(
        State(received): State<Received>,
        Path((course_id, chapter_id)): Path<(String, String)>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        received
            .lock()
            .unwrap()
            .push((format!("chapter:{course_id}/{chapter_id}"), body));
        StatusCode::OK
    }

    async fn checkout(Path(course_id): Path<String>) -> Json<Value> {
        Json(json!({ "url": format!("https://pay.example.com/{course_id}") }))
    }

    async fn get_course(Path(course_id): Path<String>) -> Json<Value> {
        Json(json!({
            "id": course_id,
            "title": "Rust for teachers",
            "description": null,
            "price": 19.99,
            "chapters": [
                { "id": "ch1", "courseId": course_id, "title": "Intro", "isFree": true }
            ],
        }))
    }

    /// Fake course API on a random local port
    async fn serve(received: Received) -> HttpGateway {
        let app = Router::new()
            .route("/api/courses/{course_id}", patch(patch_course).get(get_course))
            .route("/api/courses/{course_id}/chapters/{chapter_id}", patch(patch_chapter))
            .route("/api/courses/{course_id}/checkout", post(checkout))
            .route("/api/courses/broken/checkout", post(|| async { "not json" }))
            .route("/api/courses/down", patch(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/health", get(|| async { "ok" }))
            .with_state(received);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        HttpGateway::new(ClientConfig::new(format!("http://{addr}")).unwrap())
    }

    #[tokio::test]
    async fn test_update_sends_only_the_patch() {
        let received = Received::default();
        let gateway = serve(received.clone()).await;

        let request = UpdateRequest {
            path: ResourcePath::course(CourseId::new("c1")),
            patch: Patch {
                price: Some(dec!(19.99)),
                ..Default::default()
            },
        };
        gateway.update(&request).await.unwrap();

        let request = UpdateRequest {
            path: ResourcePath::chapter(CourseId::new("c1"), ChapterId::new("ch1")),
            patch: Patch {
                is_free: Some(true),
                ..Default::default()
            },
        };
        gateway.update(&request).await.unwrap();

        let received = received.lock().unwrap().clone();
        assert_eq!(
            received,
            vec![
                ("course:c1".to_string(), json!({ "price": 19.99 })),
                ("chapter:c1/ch1".to_string(), json!({ "isFree": true })),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_failure() {
        let gateway = serve(Received::default()).await;
        let request = UpdateRequest {
            path: ResourcePath::course(CourseId::new("down")),
            patch: Patch::default(),
        };
        assert_eq!(gateway.update(&request).await, Err(TransportError::Status(500)));
    }

    #[tokio::test]
    async fn test_checkout_returns_redirect_url() {
        let gateway = serve(Received::default()).await;

        let session = gateway.checkout(&CourseId::new("c7")).await.unwrap();
        assert_eq!(session.url, "https://pay.example.com/c7");

        let err = gateway.checkout(&CourseId::new("broken")).await.unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpGateway::new(ClientConfig::new(format!("http://{addr}")).unwrap());
        let err = gateway.checkout(&CourseId::new("c1")).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn test_course_snapshot() {
        let gateway = serve(Received::default()).await;
        let course = gateway.course(&CourseId::new("c1")).await.unwrap();

        assert_eq!(course.price, Some(dec!(19.99)));
        assert_eq!(course.description, None);
        assert_eq!(course.completion(), (2, 3));
        assert!(course.chapters[0].is_free);
    }

    #[tokio::test]
    async fn test_price_field_against_http_api() {
        let received = Received::default();
        let gateway = serve(received.clone()).await;
        let toasts = SharedToasts::new();
        let services = Services {
            gateway: Arc::new(gateway),
            notifier: Arc::new(toasts.clone()),
            refresh: Arc::new(|| {}),
        };

        let price = FieldController::<Price>::new(
            ResourcePath::course(CourseId::new("c1")),
            None,
            services,
        );
        price.begin_edit();
        price.set_draft("19.99".into());

        assert_eq!(price.submit().await, SubmitOutcome::Committed(dec!(19.99)));
        assert_eq!(price.display().text, "$19.99");
        assert_eq!(received.lock().unwrap()[0].1, json!({ "price": 19.99 }));
        assert_eq!(toasts.drain()[0].message, "Course updated!");
    }
}
