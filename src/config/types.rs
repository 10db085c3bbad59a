use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Reject non-public routes without credentials. Off by default, which
    /// lets every request through.
    #[serde(default)]
    pub enforce: bool,

    /// Bearer token accepted on protected routes when `enforce` is set
    #[serde(default)]
    pub api_key: Option<String>,

    /// Anchored regular expressions for routes that never require credentials
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,
}

fn default_public_routes() -> Vec<String> {
    vec![
        "/".to_string(),
        "/sign-in(.*)".to_string(),
        "/sign-up(.*)".to_string(),
    ]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enforce: false,
            api_key: None,
            public_routes: default_public_routes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: AuthConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDb v3 API key. Overridden by the `TMDB_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImagesConfig {
    /// Remote image sources the rendered pages may reference
    #[serde(default = "default_remote_patterns")]
    pub remote_patterns: Vec<RemotePattern>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            remote_patterns: default_remote_patterns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemotePattern {
    #[serde(default = "default_protocol")]
    pub protocol: String,

    pub hostname: String,

    /// Explicit port; empty matches only the scheme's default port
    #[serde(default)]
    pub port: String,

    /// Path prefix; a trailing `/**` matches anything below it
    #[serde(default = "default_pathname")]
    pub pathname: String,
}

fn default_protocol() -> String {
    "https".to_string()
}

fn default_pathname() -> String {
    "/**".to_string()
}

fn default_remote_patterns() -> Vec<RemotePattern> {
    vec![RemotePattern {
        protocol: "https".to_string(),
        hostname: "image.tmdb.org".to_string(),
        port: String::new(),
        pathname: "/t/p/**".to_string(),
    }]
}

impl RemotePattern {
    /// Check whether an absolute URL falls under this pattern.
    ///
    /// The URL is parsed first, so dot-segments are resolved and a default
    /// port is dropped before the path prefix is compared.
    pub fn matches(&self, url: &str) -> bool {
        let Ok(url) = Url::parse(url) else {
            return false;
        };

        if url.scheme() != self.protocol.to_ascii_lowercase() {
            return false;
        }
        match url.host_str() {
            Some(host) if host.eq_ignore_ascii_case(&self.hostname) => {}
            _ => return false,
        }

        let port_ok = match self.port.trim() {
            "" => url.port().is_none(),
            want => want.parse::<u16>().ok() == url.port_or_known_default(),
        };
        if !port_ok {
            return false;
        }

        let path = url.path();
        match self.pathname.strip_suffix("**") {
            Some(prefix) => path.starts_with(prefix),
            None => path == self.pathname,
        }
    }
}

impl ImagesConfig {
    pub fn is_allowed(&self, url: &str) -> bool {
        self.remote_patterns.iter().any(|p| p.matches(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern_allows_tmdb_images() {
        let images = ImagesConfig::default();
        assert!(images.is_allowed("https://image.tmdb.org/t/p/w500/abc.jpg"));
    }

    #[test]
    fn default_pattern_rejects_other_hosts_and_paths() {
        let images = ImagesConfig::default();
        assert!(!images.is_allowed("http://image.tmdb.org/t/p/w500/abc.jpg"));
        assert!(!images.is_allowed("https://evil.example/t/p/w500/abc.jpg"));
        assert!(!images.is_allowed("https://image.tmdb.org/other/abc.jpg"));
    }

    #[test]
    fn exact_pathname_pattern() {
        let pattern = RemotePattern {
            protocol: "https".into(),
            hostname: "cdn.example".into(),
            port: String::new(),
            pathname: "/logo.png".into(),
        };
        assert!(pattern.matches("https://cdn.example/logo.png"));
        assert!(!pattern.matches("https://cdn.example/logo.png.bak"));
    }

    #[test]
    fn dot_segments_cannot_escape_path_prefix() {
        let images = ImagesConfig::default();
        assert!(!images.is_allowed("https://image.tmdb.org/t/p/../../private/x.jpg"));
        assert!(!images.is_allowed("https://image.tmdb.org/t/p/%2e%2e/%2e%2e/private/x.jpg"));
        assert!(images.is_allowed("https://image.tmdb.org/t/x/../p/w500/abc.jpg"));
    }

    #[test]
    fn default_port_is_equivalent_to_no_port() {
        let images = ImagesConfig::default();
        assert!(images.is_allowed("https://image.tmdb.org:443/t/p/w500/abc.jpg"));
        assert!(images.is_allowed("HTTPS://IMAGE.TMDB.ORG/t/p/w500/abc.jpg"));
        assert!(!images.is_allowed("https://image.tmdb.org:8443/t/p/w500/abc.jpg"));
        assert!(!images.is_allowed("/t/p/w500/abc.jpg"));
    }

    #[test]
    fn explicit_port_pattern() {
        let pattern = RemotePattern {
            protocol: "http".into(),
            hostname: "localhost".into(),
            port: "8080".into(),
            pathname: "/**".into(),
        };
        assert!(pattern.matches("http://localhost:8080/img/a.png"));
        assert!(!pattern.matches("http://localhost/img/a.png"));
        assert!(!pattern.matches("http://localhost:9090/img/a.png"));
    }

    #[test]
    fn default_public_routes_match_original_set() {
        let auth = AuthConfig::default();
        assert!(!auth.enforce);
        assert_eq!(auth.public_routes, vec!["/", "/sign-in(.*)", "/sign-up(.*)"]);
    }
}
