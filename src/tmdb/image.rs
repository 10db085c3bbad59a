//! Image URL construction from a fetched [`ImageConfig`].

use super::types::ImageConfig;

/// Poster size used on search result cards.
pub const CARD_POSTER_SIZE: &str = "w342";
/// Poster size used on the details page.
pub const DETAIL_POSTER_SIZE: &str = "w500";
/// Backdrop size used on the details page.
pub const BACKDROP_SIZE: &str = "w1280";

/// Build an absolute image URL from a relative TMDb path such as `/abc.jpg`.
///
/// Returns `None` when the path is missing or empty, or when the config has
/// no secure base URL.
pub fn build_image_url(
    path: Option<&str>,
    size: &str,
    config: Option<&ImageConfig>,
) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let base = config?.secure_base_url()?;
    Some(format!("{base}{size}{path}"))
}
