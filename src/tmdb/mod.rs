//! TMDb (The Movie Database) data access.
//!
//! [`TmdbClient`] wraps the v3 REST API; the page handlers only see the
//! [`MovieSource`] trait so they can run against in-memory fakes in tests.

mod client;
mod error;
mod image;
mod types;

pub use client::TmdbClient;
pub use error::{Error, Result};
pub use image::{build_image_url, BACKDROP_SIZE, CARD_POSTER_SIZE, DETAIL_POSTER_SIZE};
pub use types::{Genre, ImageConfig, ImagesSection, MovieDetail, MovieSummary, SearchResultPage};

use async_trait::async_trait;

/// Async source of movie data.
///
/// Implementations must be shareable across request handlers.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Search movies by title, returning one 1-based page of results.
    async fn search(&self, query: &str, page: u32) -> Result<SearchResultPage>;

    /// Fetch the full record for `movie_id`. The caller checks
    /// [`MovieDetail::is_found`].
    async fn get_detail(&self, movie_id: u64) -> Result<MovieDetail>;

    /// Fetch the image configuration used by [`build_image_url`].
    async fn get_image_config(&self) -> Result<ImageConfig>;
}
