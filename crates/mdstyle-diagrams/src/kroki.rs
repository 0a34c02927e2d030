//! Kroki HTTP client for mermaid diagrams.

use std::time::Duration;

use mdstyle_renderer::{DiagramError, DiagramErrorKind, DiagramRenderer};
use ureq::Agent;

use crate::cache::{DiagramCache, DiagramKey, NullCache};
use crate::svg::{strip_google_fonts_import, with_svg_id};

const ENDPOINT: &str = "mermaid";
const FORMAT: &str = "svg";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create HTTP agent with the specified timeout.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Renders mermaid source to SVG through a Kroki server.
///
/// Rendered SVG is cached by content hash before the element id is applied.
pub struct KrokiRenderer {
    agent: Agent,
    server_url: String,
    cache: Box<dyn DiagramCache>,
}

impl KrokiRenderer {
    /// Create a renderer for `server_url` with no caching.
    pub fn new(server_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: create_agent(timeout),
            server_url: server_url.into().trim_end_matches('/').to_owned(),
            cache: Box::new(NullCache),
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Box<dyn DiagramCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Render endpoint URL.
    pub fn endpoint_url(&self) -> String {
        format!("{}/{ENDPOINT}/{FORMAT}", self.server_url)
    }

    fn send_request(&self, source: &str, id: &str) -> Result<String, DiagramError> {
        let error = |kind| DiagramError {
            id: id.to_owned(),
            kind,
        };

        let response = self
            .agent
            .post(&self.endpoint_url())
            .header("Content-Type", "text/plain")
            .send(source.as_bytes())
            .map_err(|e| error(DiagramErrorKind::Http(e.to_string())))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();
        if status >= 400 {
            let error_body = body.read_to_string().unwrap_or_default();
            return Err(error(DiagramErrorKind::Http(format!(
                "HTTP {status}: {error_body}"
            ))));
        }

        let svg = body
            .read_to_string()
            .map_err(|e| error(DiagramErrorKind::Io(e.to_string())))?;
        if !svg.contains("<svg") {
            return Err(error(DiagramErrorKind::InvalidSvg));
        }
        Ok(strip_google_fonts_import(svg.trim()))
    }
}

impl DiagramRenderer for KrokiRenderer {
    fn render(&self, source: &str, id: &str) -> Result<String, DiagramError> {
        let key = DiagramKey {
            source,
            endpoint: ENDPOINT,
            format: FORMAT,
        };

        let svg = if let Some(svg) = self.cache.get(key) {
            tracing::debug!(id, "Diagram cache hit");
            svg
        } else {
            let svg = self.send_request(source, id)?;
            tracing::debug!(id, bytes = svg.len(), "Rendered diagram");
            self.cache.set(key, &svg);
            svg
        };

        with_svg_id(&svg, id).ok_or_else(|| DiagramError {
            id: id.to_owned(),
            kind: DiagramErrorKind::InvalidSvg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoint_url_trims_slash() {
        let renderer = KrokiRenderer::new("https://kroki.io/", DEFAULT_TIMEOUT);
        assert_eq!(renderer.endpoint_url(), "https://kroki.io/mermaid/svg");
    }

    #[test]
    fn test_unreachable_server_is_http_error() {
        let renderer = KrokiRenderer::new("http://127.0.0.1:9", Duration::from_millis(500));
        let err = renderer.render("graph TD; A-->B", "mermaid-diagram-0").unwrap_err();
        assert_eq!(err.id, "mermaid-diagram-0");
        assert!(matches!(err.kind, DiagramErrorKind::Http(_)), "{err}");
    }

    #[test]
    fn test_cached_svg_gets_requested_id() {
        let cache = MemoryCache::default();
        let key = DiagramKey {
            source: "graph TD; A-->B",
            endpoint: ENDPOINT,
            format: FORMAT,
        };
        cache.set(key, r#"<svg id="old"><style>#old .node{}</style><g/></svg>"#);

        // Server is unreachable, so output must come from the cache
        let renderer = KrokiRenderer::new("http://127.0.0.1:9", Duration::from_millis(500))
            .with_cache(Box::new(cache));
        assert_eq!(
            renderer.render("graph TD; A-->B", "mermaid-diagram-0").unwrap(),
            r#"<svg id="mermaid-diagram-0"><style>#mermaid-diagram-0 .node{}</style><g/></svg>"#
        );
        assert_eq!(
            renderer.render("graph TD; A-->B", "mermaid-diagram-5").unwrap(),
            r#"<svg id="mermaid-diagram-5"><style>#mermaid-diagram-5 .node{}</style><g/></svg>"#
        );
    }
}
