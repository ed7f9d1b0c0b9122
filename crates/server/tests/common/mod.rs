//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that builds the real router over
//! mock platforms and an in-memory feature table, so every route can be
//! exercised without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use moodtune_core::{
    testing::{MockFeatureSource, MockPlatform},
    Config, ConversionPipeline, GenerationPipeline, Platform,
};
use moodtune_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use moodtune_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_convert() {
///     let fixture = TestFixture::new();
///     fixture.spotify.add_playlist("p1", vec![...]).await;
///
///     let response = fixture.post("/api/v1/convert", json!({
///         "playlist_url": fixtures::spotify_url("p1"),
///         "target_platform": "youtube"
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock Spotify - configure playlists and search hits
    pub spotify: MockPlatform,
    /// Mock YouTube Music - configure playlists and search hits
    pub youtube: MockPlatform,
    /// Mock feature table
    pub features: MockFeatureSource,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default config.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let spotify = MockPlatform::new(Platform::Spotify)
            .with_allow_empty_playlist(config.spotify.allow_empty_playlist);
        let youtube = MockPlatform::new(Platform::YouTube)
            .with_allow_empty_playlist(config.youtube.allow_empty_playlist);
        let features = MockFeatureSource::new();

        let conversion = Arc::new(
            ConversionPipeline::new(Arc::new(spotify.clone()), Arc::new(youtube.clone()))
                .with_default_name(config.defaults.converted_playlist_name.clone()),
        );
        let generation =
            GenerationPipeline::new(Arc::clone(&conversion), Arc::new(features.clone()))
                .with_default_name(config.defaults.generated_playlist_name.clone());

        let state = Arc::new(AppState::new(config, conversion, generation));
        let router = create_router(state);

        Self {
            router,
            spotify,
            youtube,
            features,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
