//! HTML pages: the search page, the movie details page, and the shared shell.

pub mod detail;
pub mod format;
pub mod layout;
pub mod search;

pub use detail::{
    load_detail, page_metadata, parse_movie_id, DetailOutcome, DetailPage, PageMetadata,
};
pub use search::SearchState;

use crate::config::ImagesConfig;

/// Keep an image URL only if it falls under an allowed remote pattern.
pub(crate) fn permitted_image<'a>(url: Option<&'a str>, images: &ImagesConfig) -> Option<&'a str> {
    let url = url?;
    if images.is_allowed(url) {
        Some(url)
    } else {
        tracing::warn!(url, "Image URL is not in the allowed remote patterns");
        None
    }
}
