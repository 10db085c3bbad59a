//! Movie details page.
//!
//! The primary render path and the metadata path each fetch the movie on
//! their own; a failure in one never changes the other's outcome.

use tracing::{error, warn};

use super::format::{
    escape_html, format_currency, format_rating, format_release_date, format_runtime,
};
use super::layout::{render_page, SITE_NAME};
use super::permitted_image;
use crate::config::ImagesConfig;
use crate::tmdb::{
    build_image_url, MovieDetail, MovieSource, BACKDROP_SIZE, DETAIL_POSTER_SIZE,
};

pub const NOT_FOUND_TITLE: &str = "Movie Not Found";
pub const ERROR_TITLE: &str = "Error Loading Movie";

/// A movie ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub movie: MovieDetail,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Found(Box<DetailPage>),
    NotFound,
}

/// `<title>` and description for the details page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
}

impl PageMetadata {
    fn title_only(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
        }
    }
}

/// Parse a route parameter as a TMDb movie ID.
///
/// Only plain positive decimal integers are accepted.
pub fn parse_movie_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok().filter(|id| *id > 0)
}

/// Resolve a route parameter to a renderable movie.
///
/// Invalid IDs return [`DetailOutcome::NotFound`] without touching the
/// network. The movie and the image config are fetched concurrently and the
/// load fails as a whole if either request fails.
pub async fn load_detail(source: &dyn MovieSource, raw_id: &str) -> DetailOutcome {
    let Some(movie_id) = parse_movie_id(raw_id) else {
        warn!(raw_id, "Invalid movie ID in route");
        return DetailOutcome::NotFound;
    };

    let fetched = tokio::try_join!(source.get_detail(movie_id), source.get_image_config());
    let (movie, image_config) = match fetched {
        Ok(pair) => pair,
        Err(e) => {
            error!(movie_id, error = %e, "Failed to fetch movie details");
            return DetailOutcome::NotFound;
        }
    };

    if !movie.is_found() {
        warn!(
            movie_id,
            status_message = movie.status_message.as_deref().unwrap_or(""),
            "Movie not found on TMDb"
        );
        return DetailOutcome::NotFound;
    }

    let poster_url = build_image_url(
        movie.poster_path.as_deref(),
        DETAIL_POSTER_SIZE,
        Some(&image_config),
    );
    let backdrop_url = build_image_url(
        movie.backdrop_path.as_deref(),
        BACKDROP_SIZE,
        Some(&image_config),
    );

    DetailOutcome::Found(Box::new(DetailPage {
        movie,
        poster_url,
        backdrop_url,
    }))
}

/// Derive the page title and description with a separate detail fetch.
pub async fn page_metadata(source: &dyn MovieSource, raw_id: &str) -> PageMetadata {
    let Some(movie_id) = parse_movie_id(raw_id) else {
        return PageMetadata::title_only(NOT_FOUND_TITLE);
    };

    match source.get_detail(movie_id).await {
        Ok(movie) if !movie.is_found() => PageMetadata::title_only(NOT_FOUND_TITLE),
        Ok(movie) => {
            let description = if movie.overview.is_empty() {
                format!("Details for the movie {}", movie.title)
            } else {
                movie.overview.clone()
            };
            PageMetadata {
                title: format!("{} - {SITE_NAME}", movie.title),
                description: Some(description),
            }
        }
        Err(e) => {
            error!(movie_id, error = %e, "Failed to generate metadata for movie");
            PageMetadata::title_only(ERROR_TITLE)
        }
    }
}

fn info_row(label: &str, value: &str) -> String {
    format!(
        r#"    <div><span class="label">{label}:</span> <span class="value">{}</span></div>
"#,
        escape_html(value)
    )
}

/// Render the details body inside the page shell.
pub fn render_detail(page: &DetailPage, meta: &PageMetadata, images: &ImagesConfig) -> String {
    let movie = &page.movie;
    let title = escape_html(&movie.title);
    let backdrop = permitted_image(page.backdrop_url.as_deref(), images);
    let poster = permitted_image(page.poster_url.as_deref(), images);

    let mut body = String::from("<div class=\"container movie-detail\">\n");

    if let Some(url) = backdrop {
        body.push_str(&format!(
            r#"<div class="backdrop">
  <img src="{}" alt="{title} backdrop">
  <div class="overlay"></div>
  <h1>{title}</h1>
</div>
"#,
            escape_html(url)
        ));
    }

    body.push_str("<div class=\"columns\">\n<div class=\"poster\">\n");
    match poster {
        Some(url) => body.push_str(&format!(
            r#"  <img src="{}" alt="{title} poster" width="500" height="750">
"#,
            escape_html(url)
        )),
        None => body.push_str("  <div class=\"placeholder\">No Poster</div>\n"),
    }
    body.push_str("</div>\n<div class=\"info\">\n");

    if backdrop.is_none() {
        body.push_str(&format!("  <h1>{title}</h1>\n"));
    }
    body.push_str(&format!(
        "  <p class=\"tagline\">{}</p>\n  <p class=\"overview\">{}</p>\n",
        escape_html(movie.tagline.as_deref().unwrap_or("")),
        escape_html(&movie.overview)
    ));

    body.push_str("  <div class=\"facts\">\n");
    body.push_str(&info_row("Release Date", &format_release_date(&movie.release_date)));
    body.push_str(&info_row("Runtime", &format_runtime(movie.runtime)));
    body.push_str(&info_row(
        "Rating",
        &format_rating(movie.vote_average, movie.vote_count),
    ));
    if let Some(budget) = format_currency(movie.budget) {
        body.push_str(&info_row("Budget", &budget));
    }
    if let Some(revenue) = format_currency(movie.revenue) {
        body.push_str(&info_row("Revenue", &revenue));
    }
    body.push_str("  </div>\n");

    if !movie.genres.is_empty() {
        body.push_str(
            "  <div class=\"genres\">\n    <span class=\"label\">Genres:</span>\n    <ul>\n",
        );
        for genre in &movie.genres {
            body.push_str(&format!(
                "      <li class=\"chip\" data-genre-id=\"{}\">{}</li>\n",
                genre.id,
                escape_html(&genre.name)
            ));
        }
        body.push_str("    </ul>\n  </div>\n");
    }

    body.push_str("</div>\n</div>\n</div>");

    render_page(&meta.title, meta.description.as_deref(), &body)
}
