//! Search page state and rendering.
//!
//! Each submission takes a ticket; only the most recent ticket may publish
//! results, so a slow older search can never overwrite a newer one.

use tracing::error;

use super::format::{escape_html, release_year};
use super::layout::{render_page, SITE_NAME};
use super::permitted_image;
use crate::config::ImagesConfig;
use crate::tmdb::{
    self, build_image_url, ImageConfig, MovieSource, MovieSummary, SearchResultPage,
    CARD_POSTER_SIZE,
};

pub const CONFIG_ERROR: &str = "Could not load TMDb configuration.";
pub const NO_RESULTS: &str = "No movies found for your query.";
pub const SEARCH_ERROR: &str = "An error occurred while searching. Please try again.";

/// Handle for one in-flight search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<MovieSummary>,
    pub image_config: Option<ImageConfig>,
    pub is_loading: bool,
    pub error: Option<String>,
    latest_ticket: u64,
}

impl SearchState {
    /// Fresh page state with the image configuration loaded.
    ///
    /// Without a config the form stays disabled and an error is shown.
    pub async fn load(source: &dyn MovieSource) -> Self {
        let mut state = Self::default();
        match source.get_image_config().await {
            Ok(config) => state.image_config = Some(config),
            Err(e) => {
                error!(error = %e, "Failed to fetch TMDb config");
                state.error = Some(CONFIG_ERROR.to_string());
            }
        }
        state
    }

    /// Whether the form inputs are usable at all.
    pub fn form_enabled(&self) -> bool {
        self.image_config.is_some()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.query.trim().is_empty() && self.form_enabled()
    }

    /// Start a search for the current query.
    ///
    /// Returns `None` without touching any state when the query is blank or
    /// no image configuration is loaded.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        if self.query.trim().is_empty() || self.image_config.is_none() {
            return None;
        }

        self.latest_ticket += 1;
        self.is_loading = true;
        self.error = None;
        self.results.clear();
        Some(SearchTicket(self.latest_ticket))
    }

    /// Publish the outcome of a search.
    ///
    /// Returns `false` and leaves the state alone when a newer search has
    /// been started since `ticket` was issued.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: tmdb::Result<SearchResultPage>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            return false;
        }

        match outcome {
            Ok(page) => {
                self.results = page.results;
                if self.results.is_empty() {
                    self.error = Some(NO_RESULTS.to_string());
                }
            }
            Err(e) => {
                error!(query = %self.query, error = %e, "Failed to search movies");
                self.results.clear();
                self.error = Some(SEARCH_ERROR.to_string());
            }
        }
        self.is_loading = false;
        true
    }

    /// Run a search for the current query to completion.
    pub async fn submit(&mut self, source: &dyn MovieSource) {
        let Some(ticket) = self.begin_search() else {
            return;
        };
        let outcome = source.search(&self.query, 1).await;
        self.complete_search(ticket, outcome);
    }
}

fn render_card(movie: &MovieSummary, state: &SearchState, images: &ImagesConfig) -> String {
    let title = escape_html(&movie.title);
    let poster_url = build_image_url(
        movie.poster_path.as_deref(),
        CARD_POSTER_SIZE,
        state.image_config.as_ref(),
    );

    let poster = match permitted_image(poster_url.as_deref(), images) {
        Some(url) => format!(r#"<img src="{}" alt="{title} poster">"#, escape_html(url)),
        None => r#"<div class="placeholder">No Poster</div>"#.to_string(),
    };

    format!(
        r#"  <a class="card" href="/movie/{id}">
    <div class="card-poster">{poster}</div>
    <div class="card-body">
      <h3 title="{title}">{title}</h3>
      <p class="year">{year}</p>
    </div>
  </a>
"#,
        id = movie.id,
        year = release_year(&movie.release_date),
    )
}

/// Render the search form, any message, and the result grid.
pub fn render_search(state: &SearchState, images: &ImagesConfig) -> String {
    let input_disabled = if state.form_enabled() { "" } else { " disabled" };
    let button_disabled = if state.can_submit() { "" } else { " disabled" };
    let button_label = if state.is_loading { "Searching..." } else { "Search" };

    let mut body = format!(
        r#"<div class="container">
<h1>Search Movies</h1>
<form method="get" action="/search" class="search-form">
  <input type="text" name="query" value="{query}" placeholder="Search for a movie..."{input_disabled}>
  <button type="submit"{button_disabled}>{button_label}</button>
</form>
"#,
        query = escape_html(&state.query),
    );

    if let Some(ref message) = state.error {
        body.push_str(&format!(
            "<p class=\"message\">{}</p>\n",
            escape_html(message)
        ));
    }

    body.push_str("<div class=\"results-grid\">\n");
    for movie in &state.results {
        body.push_str(&render_card(movie, state, images));
    }
    body.push_str("</div>\n</div>");

    render_page(&format!("Search Movies - {SITE_NAME}"), None, &body)
}
