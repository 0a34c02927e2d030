//! HTTP stylesheet fetcher.

use std::time::Duration;

use ureq::Agent;

use crate::{FetchError, StylesheetFetcher};

/// highlight.js theme stylesheets on the bootcdn mirror. `{theme}` is
/// replaced by the theme id.
pub const DEFAULT_STYLESHEET_URL: &str =
    "https://cdn.bootcdn.net/ajax/libs/highlight.js/11.10.0/styles/{theme}.min.css";

/// Create HTTP agent with the specified timeout.
///
/// Non-2xx responses are returned as responses so that the status can be
/// reported.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Fetches stylesheets by substituting the theme id into a URL pattern.
pub struct HttpFetcher {
    agent: Agent,
    url_pattern: String,
}

impl HttpFetcher {
    pub fn new(url_pattern: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: create_agent(timeout),
            url_pattern: url_pattern.into(),
        }
    }

    /// URL of the stylesheet for `theme_id`.
    pub fn url_for(&self, theme_id: &str) -> String {
        self.url_pattern.replace("{theme}", theme_id)
    }
}

impl StylesheetFetcher for HttpFetcher {
    fn fetch(&self, theme_id: &str) -> Result<String, FetchError> {
        let url = self.url_for(theme_id);
        let response = self.agent.get(&url).call().map_err(|e| FetchError::Http {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Status { url, status });
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Body {
                url,
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_default_pattern() {
        let fetcher = HttpFetcher::new(DEFAULT_STYLESHEET_URL, Duration::from_secs(1));
        assert_eq!(
            fetcher.url_for("tokyo-night-light"),
            "https://cdn.bootcdn.net/ajax/libs/highlight.js/11.10.0/styles/tokyo-night-light.min.css"
        );
    }

    #[test]
    fn test_unreachable_host_is_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let fetcher = HttpFetcher::new("http://127.0.0.1:9/{theme}.css", Duration::from_millis(500));
        let err = fetcher.fetch("github").unwrap_err();
        assert!(matches!(err, FetchError::Http { .. }), "{err}");
    }
}
