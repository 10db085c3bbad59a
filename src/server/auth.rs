//! Route protection.
//!
//! Two separate pieces: [`RoutePolicy`] decides which paths are public, and
//! [`auth_gate`] enforces credentials on the rest. Every request passes through
//! unless `[server.auth] enforce = true`.

use crate::config::AuthConfig;
use crate::server::AppContext;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};
use regex::Regex;

/// Compiled set of public route patterns.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    public: Vec<Regex>,
}

impl RoutePolicy {
    /// Compile patterns such as `/sign-in(.*)`. Each pattern must match the
    /// whole path.
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        let public = patterns
            .iter()
            .map(|p| Regex::new(&format!("^(?:{p})$")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { public })
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|re| re.is_match(path))
    }
}

/// Whether the gate looks at this path at all.
///
/// Static assets (a final segment like `name.ext`) and framework internals
/// under `/_next` are skipped; `/api` and `/trpc` are always considered.
pub fn is_gated_path(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);

    if rest.starts_with("api") || rest.starts_with("trpc") {
        return true;
    }
    if rest.starts_with("_next") {
        return false;
    }

    !is_static_asset(rest)
}

fn is_static_asset(rest: &str) -> bool {
    match rest.rfind('.') {
        Some(idx) if idx > 0 => {
            let ext = &rest[idx + 1..];
            !ext.is_empty() && ext.chars().all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Check credentials for a protected route
fn check_auth(
    auth_config: &AuthConfig,
    bearer_token: Option<&str>,
) -> Result<(), (StatusCode, &'static str)> {
    if !auth_config.enforce {
        return Ok(());
    }

    if let (Some(token), Some(api_key)) = (bearer_token, auth_config.api_key.as_deref()) {
        if token == api_key {
            return Ok(());
        }
    }

    Err((StatusCode::UNAUTHORIZED, "Authentication required"))
}

/// Middleware applying the route policy to every request
pub async fn auth_gate(
    State(ctx): State<AppContext>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let path = request.uri().path();

    if is_gated_path(path) && !ctx.route_policy.is_public(path) {
        let bearer_token = bearer.as_ref().map(|b| b.token());
        if let Err(rejection) = check_auth(&ctx.config.server.auth, bearer_token) {
            tracing::debug!(path, "Rejected unauthenticated request");
            return Err(rejection);
        }
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_policy() -> RoutePolicy {
        RoutePolicy::new(&AuthConfig::default().public_routes).unwrap()
    }

    #[test]
    fn public_routes() {
        let policy = default_policy();
        assert!(policy.is_public("/"));
        assert!(policy.is_public("/sign-in"));
        assert!(policy.is_public("/sign-in/factor-one"));
        assert!(policy.is_public("/sign-up"));
        assert!(!policy.is_public("/search"));
        assert!(!policy.is_public("/movie/27205"));
        assert!(!policy.is_public("/x/sign-in"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(RoutePolicy::new(&["/(".to_string()]).is_err());
    }

    #[test]
    fn gated_paths() {
        assert!(is_gated_path("/"));
        assert!(is_gated_path("/search"));
        assert!(is_gated_path("/movie/27205"));
        assert!(is_gated_path("/api/data.json"));
        assert!(!is_gated_path("/favicon.ico"));
        assert!(!is_gated_path("/assets/app.css"));
        assert!(!is_gated_path("/_next/static/chunk"));
    }

    #[test]
    fn enforcement_disabled_allows_everything() {
        let config = AuthConfig::default();
        assert!(check_auth(&config, None).is_ok());
        assert!(check_auth(&config, Some("anything")).is_ok());
    }

    #[test]
    fn enforcement_requires_matching_bearer() {
        let config = AuthConfig {
            enforce: true,
            api_key: Some("secret".into()),
            ..Default::default()
        };
        assert!(check_auth(&config, Some("secret")).is_ok());
        assert_eq!(
            check_auth(&config, Some("wrong")).unwrap_err().0,
            StatusCode::UNAUTHORIZED
        );
        assert!(check_auth(&config, None).is_err());
    }
}
