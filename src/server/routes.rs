//! Page handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::AppContext;
use crate::views::{self, layout, search, DetailOutcome, SearchState};

pub fn page_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search_page))
        .route("/movie/:movie_id", get(movie_page))
        .route("/sign-in", get(sign_in))
        .route("/sign-up", get(sign_up))
}

/// HTML 404 page.
pub struct NotFoundPage {
    title: String,
}

impl NotFoundPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl IntoResponse for NotFoundPage {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Html(layout::render_not_found(&self.title)),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

async fn home() -> Html<String> {
    Html(layout::render_home())
}

async fn search_page(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let source = ctx.source.as_ref();
    let mut state = SearchState::load(source).await;

    if let Some(query) = params.query {
        state.query = query;
        state.submit(source).await;
    }

    Html(search::render_search(&state, &ctx.config.images))
}

async fn movie_page(State(ctx): State<AppContext>, Path(movie_id): Path<String>) -> Response {
    let source = ctx.source.as_ref();
    let (outcome, meta) = tokio::join!(
        views::load_detail(source, &movie_id),
        views::page_metadata(source, &movie_id)
    );

    match outcome {
        DetailOutcome::Found(page) => {
            Html(views::detail::render_detail(&page, &meta, &ctx.config.images)).into_response()
        }
        DetailOutcome::NotFound => NotFoundPage::new(meta.title).into_response(),
    }
}

async fn sign_in() -> Html<String> {
    Html(layout::render_account_placeholder("Sign In"))
}

async fn sign_up() -> Html<String> {
    Html(layout::render_account_placeholder("Sign Up"))
}

pub async fn not_found() -> NotFoundPage {
    NotFoundPage::new("404: This page could not be found.")
}
