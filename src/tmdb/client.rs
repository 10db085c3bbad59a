//! HTTP client for the three TMDb endpoints the pages use.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::error::{Error, Result};
use super::types::{ImageConfig, MovieDetail, SearchResultPage};
use super::MovieSource;
use crate::config::TmdbConfig;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDb v3 client.
///
/// Every request carries the API key as the `api_key` query parameter. Failed
/// requests are not retried.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Build a client against the public TMDb API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    /// Build a client from the `[tmdb]` config section.
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        let api_key = config.api_key.clone().unwrap_or_default();
        Self::with_options(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Build a client with an explicit base URL and timeout.
    ///
    /// Fails with [`Error::MissingApiKey`] when the key is blank, so a
    /// misconfigured deployment never sends unauthenticated requests.
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            error!("Missing TMDb API key config. Set TMDB_API_KEY or [tmdb] api_key.");
            return Err(Error::MissingApiKey);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// GET `path` with the API key plus `params`, decoding the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(path, "TMDb request");

        let resp = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!(path, error = %e, "Error fetching from TMDb");
                Error::Request(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(path, status = %status, body = %body, "TMDb API error");
            return Err(Error::Status { status, body });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(path, error = %e, "Failed to parse TMDb response");
            Error::Decode(e)
        })
    }

    /// Search movies by title. `page` is 1-based.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResultPage> {
        self.get(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    /// Fetch the full record for one movie.
    ///
    /// A 200 response can still describe a missing movie; check
    /// [`MovieDetail::is_found`].
    pub async fn get_detail(&self, movie_id: u64) -> Result<MovieDetail> {
        self.get(&format!("/movie/{movie_id}"), &[]).await
    }

    /// Fetch the image base URLs. The result does not change during the
    /// process lifetime.
    pub async fn get_image_config(&self) -> Result<ImageConfig> {
        self.get("/configuration", &[]).await
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchResultPage> {
        TmdbClient::search(self, query, page).await
    }

    async fn get_detail(&self, movie_id: u64) -> Result<MovieDetail> {
        TmdbClient::get_detail(self, movie_id).await
    }

    async fn get_image_config(&self) -> Result<ImageConfig> {
        TmdbClient::get_image_config(self).await
    }
}
