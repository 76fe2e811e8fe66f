//! Best-effort retrieval of the published registry document.
//!
//! The remote registry is an optional enhancement: every failure mode
//! (transport error, non-2xx status, non-JSON body, schema violation) is
//! logged and collapsed to `None` so the tool keeps working offline.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;

use super::schema::Registry;
use super::validation::parse_registry_str;

/// User agent sent with registry requests.
pub const USER_AGENT: &str = "scaffoldor-cli";

/// A source of the canonical registry document.
pub trait RemoteSource {
    /// Fetch the registry document, or `None` if it is unavailable.
    fn fetch(&self) -> Option<Registry>;
}

/// Fetches the registry document over HTTP(S).
pub struct RemoteFetcher {
    client: Client,
    url: String,
    timeout: Duration,
}

impl RemoteFetcher {
    /// Create a fetcher for the given URL with the default 30-second timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .default_headers(headers)
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            url: url.into(),
            timeout,
        }
    }

    /// The registry URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn try_fetch(&self) -> Result<Registry> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to reach {}", self.url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), self.url);
        }

        let body = response.text().context("Failed to read response body")?;
        let registry = parse_registry_str(&body)
            .map_err(|errors| anyhow::anyhow!("Remote registry is invalid:\n{}", errors))?;
        Ok(registry)
    }
}

impl RemoteSource for RemoteFetcher {
    fn fetch(&self) -> Option<Registry> {
        match self.try_fetch() {
            Ok(registry) => {
                tracing::debug!(
                    "Fetched {} templates from {}",
                    registry.template_count(),
                    self.url
                );
                Some(registry)
            }
            Err(e) => {
                tracing::warn!("Remote registry unavailable: {:#}", e);
                None
            }
        }
    }
}

/// A source that is never reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl RemoteSource for Offline {
    fn fetch(&self) -> Option<Registry> {
        None
    }
}

impl<T: RemoteSource + ?Sized> RemoteSource for &T {
    fn fetch(&self) -> Option<Registry> {
        (**self).fetch()
    }
}

impl<T: RemoteSource + ?Sized> RemoteSource for Box<T> {
    fn fetch(&self) -> Option<Registry> {
        (**self).fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const VALID: &str = r#"{
        "version": "1.0.0",
        "lastUpdated": "2024-05-01T12:00:00Z",
        "templates": {
            "alice": [
                { "slug": "api", "url": "https://github.com/alice/api", "type": "backend", "author": { "name": "Alice", "github": "alice" } }
            ]
        }
    }"#;

    #[test]
    fn default_timeout_is_30_seconds() {
        let fetcher = RemoteFetcher::new("https://example.com/registry.json");
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
        assert_eq!(fetcher.url(), "https://example.com/registry.json");
    }

    #[test]
    fn fetches_valid_registry() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/registry.json")
                .header("accept", "application/json")
                .header("user-agent", USER_AGENT);
            then.status(200).body(VALID);
        });

        let fetcher = RemoteFetcher::new(server.url("/registry.json"));
        let registry = fetcher.fetch().expect("registry should be fetched");

        mock.assert();
        assert_eq!(registry.template_count(), 1);
        assert_eq!(registry.templates["alice"][0].slug, "api");
    }

    #[test]
    fn non_success_status_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/registry.json");
            then.status(404);
        });

        let fetcher = RemoteFetcher::new(server.url("/registry.json"));
        assert!(fetcher.fetch().is_none());
    }

    #[test]
    fn non_json_body_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/registry.json");
            then.status(200).body("<html>maintenance</html>");
        });

        let fetcher = RemoteFetcher::new(server.url("/registry.json"));
        assert!(fetcher.fetch().is_none());
    }

    #[test]
    fn schema_violation_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/registry.json");
            then.status(200)
                .body(r#"{"lastUpdated":"2024-05-01T12:00:00Z","templates":{"a":[{"slug":"UPPER"}]}}"#);
        });

        let fetcher = RemoteFetcher::new(server.url("/registry.json"));
        assert!(fetcher.fetch().is_none());
    }

    #[test]
    fn unreachable_host_is_unavailable() {
        let fetcher =
            RemoteFetcher::with_timeout("http://127.0.0.1:1/registry.json", Duration::from_secs(2));
        assert!(fetcher.fetch().is_none());
    }

    #[test]
    fn offline_never_returns_a_registry() {
        assert!(Offline.fetch().is_none());
    }
}
