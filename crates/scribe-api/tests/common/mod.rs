use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware,
};
use http_body_util::BodyExt;
use scribe_api::{QuestionBank, state::ApiState};
use scribe_match::{FocusPoint, Question, Response};
use serde::Deserialize;
use tower::ServiceExt;

/// Question bank shared by the integration tests
pub fn fixture_bank() -> QuestionBank {
    let although = Question::new(
        "q-although",
        "Combine the sentences using \"although\".",
        vec![
            Response::optimal("o1", "Although it was raining, the children played outside.")
                .with_count(10)
                .with_required_words(["although"]),
            Response::optimal("o2", "The children played outside, although it was raining.")
                .with_required_words(["although"]),
            Response::new("r1", "It was raining, but the children played outside.")
                .with_feedback("Use the word \"although\".")
                .with_count(3),
        ],
    )
    .expect("valid corpus")
    .with_focus_points(vec![FocusPoint::new(
        "children",
        "Who played outside?",
    )]);

    let dog = Question::new(
        "q-dog",
        "Combine the sentences.",
        vec![Response::optimal("d1", "The dog ran quickly.")],
    )
    .expect("valid corpus");

    QuestionBank::from_questions(vec![although, dog]).expect("unique question ids")
}

/// Test state builder for creating an ApiState without touching the filesystem
pub struct TestStateBuilder {
    max_submission_chars: u64,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            max_submission_chars: 2000,
        }
    }

    pub fn max_submission_chars(mut self, max: u64) -> Self {
        self.max_submission_chars = max;
        self
    }

    pub fn build(self) -> ApiState {
        ApiState {
            bank: Arc::new(fixture_bank()),
            max_submission_chars: self.max_submission_chars,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Router wired the way `serv` wires it, minus the metrics recorder
pub fn app(state: ApiState) -> Router {
    scribe_api::router::router()
        .with_state(state)
        .layer(middleware::from_fn(
            scribe_api::middleware::request_id::request_id_middleware,
        ))
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Client over the default fixture state
    pub fn with_defaults() -> Self {
        Self::new(app(TestStateBuilder::new().build()))
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
