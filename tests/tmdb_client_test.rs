//! TMDb client tests against a mock API server.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{image_config_json, inception_json, not_found_json, API_KEY};
use masxflix::tmdb::{build_image_url, Error, TmdbClient};

async fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::with_options(API_KEY, &server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn search_sends_key_query_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("api_key", API_KEY))
        .and(query_param("query", "the matrix"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_pages": 1,
            "total_results": 2,
            "results": [
                {"id": 603, "title": "The Matrix", "poster_path": "/m.jpg",
                 "release_date": "1999-03-30", "overview": "Neo."},
                {"id": 604, "title": "The Matrix Reloaded", "poster_path": null,
                 "release_date": "", "overview": ""}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let page = client.search("the matrix", 1).await.unwrap();

    assert_eq!(page.total_results, 2);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].id, 603);
    assert_eq!(page.results[1].poster_path, None);
}

#[tokio::test]
async fn detail_decodes_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(inception_json()))
        .mount(&server)
        .await;

    let movie = client_for(&server).await.get_detail(27205).await.unwrap();
    assert!(movie.is_found());
    assert_eq!(movie.title, "Inception");
    assert_eq!(movie.budget, 160000000);
    assert_eq!(movie.genres.len(), 2);
}

#[tokio::test]
async fn in_band_not_found_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_found_json()))
        .mount(&server)
        .await;

    let movie = client_for(&server).await.get_detail(1).await.unwrap();
    assert!(!movie.is_found());
}

#[tokio::test]
async fn configuration_feeds_image_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_config_json()))
        .mount(&server)
        .await;

    let config = client_for(&server).await.get_image_config().await.unwrap();
    assert_eq!(
        build_image_url(Some("/abc.jpg"), "w500", Some(&config)).as_deref(),
        Some("https://image.tmdb.org/t/p/w500/abc.jpg")
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/configuration"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"status_message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.get_image_config().await.unwrap_err();
    assert_matches!(
        err,
        Error::Status { status, ref body } if status == 401 && body.contains("Invalid API key")
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.search("x", 1).await.unwrap_err();
    assert_matches!(err, Error::Decode(_));
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = TmdbClient::with_options(API_KEY, &uri, Duration::from_secs(2)).unwrap();
    let err = client.get_detail(5).await.unwrap_err();
    assert_matches!(err, Error::Request(_));
}
