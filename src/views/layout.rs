//! Page shell shared by every HTML response.

use super::format::escape_html;

pub const SITE_NAME: &str = "masxflix";

fn header() -> String {
    format!(
        r#"<header class="site-header">
  <div class="brand">
    <a href="/" class="logo">{SITE_NAME}</a>
    <nav><a href="/search">Search</a></nav>
  </div>
  <div class="account"><a href="/sign-in" class="button">Sign In</a></div>
</header>"#
    )
}

/// Wrap `body` (already-escaped HTML) in the document shell.
pub fn render_page(title: &str, description: Option<&str>, body: &str) -> String {
    let meta = description
        .map(|d| format!(r#"<meta name="description" content="{}">"#, escape_html(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{meta}
</head>
<body>
{header}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        header = header(),
    )
}

pub fn render_home() -> String {
    render_page(
        SITE_NAME,
        Some("Search movies and browse their details"),
        r#"<div class="container">
  <h1>Welcome to masxflix</h1>
  <p><a href="/search">Search for a movie</a></p>
</div>"#,
    )
}

/// Placeholder for the external identity provider's sign-in/sign-up flows.
pub fn render_account_placeholder(heading: &str) -> String {
    let body = format!(
        r#"<div class="container">
  <h1>{}</h1>
  <p>Accounts are managed by an external identity provider.</p>
</div>"#,
        escape_html(heading)
    );
    render_page(&format!("{heading} - {SITE_NAME}"), None, &body)
}

pub fn render_not_found(title: &str) -> String {
    render_page(
        title,
        None,
        r#"<div class="container not-found">
  <h1>404</h1>
  <p>This page could not be found.</p>
</div>"#,
    )
}
