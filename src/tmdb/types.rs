//! TMDb v3 response records.
//!
//! Every field the pages render is optional or defaulted on decode: TMDb
//! sends `null` for missing strings and a bare `{success: false, ...}` body
//! for unknown movies, and both must decode rather than fail.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as an absent field.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A single movie in a search result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// `YYYY-MM-DD`, or empty when TMDb has no date.
    #[serde(default, deserialize_with = "null_to_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub overview: String,
}

/// One page of `/search/movie` results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    #[serde(default, deserialize_with = "null_to_default")]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full record from `/movie/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub budget: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub revenue: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub genres: Vec<Genre>,
    /// Only present on error payloads, where it is `false`.
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl MovieDetail {
    /// TMDb reports unknown movies in-band with `success: false`.
    pub fn is_found(&self) -> bool {
        self.success != Some(false)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Response of `/configuration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default)]
    pub images: Option<ImagesSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagesSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub secure_base_url: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub poster_sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub backdrop_sizes: Vec<String>,
}

impl ImageConfig {
    /// Config carrying only a secure base URL.
    pub fn with_secure_base_url(url: impl Into<String>) -> Self {
        Self {
            images: Some(ImagesSection {
                secure_base_url: Some(url.into()),
                ..Default::default()
            }),
        }
    }

    pub fn secure_base_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.secure_base_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
