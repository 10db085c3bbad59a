//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which starts a wiremock server standing in for
//! TMDb and builds an [`AppContext`] whose client points at it.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use masxflix::config::Config;
use masxflix::server::{create_router, AppContext};
use masxflix::tmdb::TmdbClient;

pub const API_KEY: &str = "test-key";

pub struct TestHarness {
    pub tmdb: MockServer,
    pub ctx: AppContext,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let tmdb = MockServer::start().await;
        let client = TmdbClient::with_options(API_KEY, &tmdb.uri(), Duration::from_secs(5))
            .expect("failed to build client");
        let ctx = AppContext::new(config, Arc::new(client)).expect("failed to build context");
        Self { tmdb, ctx }
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.ctx.clone())
    }

    /// Serve `/configuration` with the public TMDb image base URL.
    pub async fn mock_image_config(&self) {
        Mock::given(method("GET"))
            .and(path("/configuration"))
            .and(query_param("api_key", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(image_config_json()))
            .mount(&self.tmdb)
            .await;
    }

    pub async fn mock_movie(&self, id: u64, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/movie/{id}")))
            .and(query_param("api_key", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.tmdb)
            .await;
    }

    pub async fn received_count(&self) -> usize {
        self.tmdb
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }
}

pub fn image_config_json() -> Value {
    json!({
        "images": {
            "base_url": "http://image.tmdb.org/t/p/",
            "secure_base_url": "https://image.tmdb.org/t/p/",
            "poster_sizes": ["w92", "w342", "w500", "original"],
            "backdrop_sizes": ["w300", "w1280", "original"]
        },
        "change_keys": []
    })
}

pub fn inception_json() -> Value {
    json!({
        "id": 27205,
        "title": "Inception",
        "tagline": "Your mind is the scene of the crime.",
        "overview": "Cobb, a skilled thief, steals secrets from dreams.",
        "poster_path": "/poster.jpg",
        "backdrop_path": "/backdrop.jpg",
        "release_date": "2010-07-15",
        "runtime": 148,
        "vote_average": 8.369,
        "vote_count": 36000,
        "budget": 160000000,
        "revenue": 839030630,
        "genres": [
            {"id": 28, "name": "Action"},
            {"id": 878, "name": "Science Fiction"}
        ]
    })
}

pub fn not_found_json() -> Value {
    json!({
        "success": false,
        "status_code": 34,
        "status_message": "The resource you requested could not be found."
    })
}

/// Helper to get response body as string
pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
