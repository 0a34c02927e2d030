//! Diagram rendering seam.

/// Single diagram rendering error.
#[derive(Debug, thiserror::Error)]
#[error("diagram {id}: {kind}")]
pub struct DiagramError {
    /// Element id the diagram was rendered for.
    pub id: String,
    pub kind: DiagramErrorKind,
}

/// Kind of diagram rendering error.
#[derive(Debug, thiserror::Error)]
pub enum DiagramErrorKind {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("response is not an SVG document")]
    InvalidSvg,
}

/// Renders diagram source into an inline SVG document.
pub trait DiagramRenderer: Send + Sync {
    /// Render `source`, giving the root element the id `id`.
    fn render(&self, source: &str, id: &str) -> Result<String, DiagramError>;
}

/// Element id of the diagram at `index`.
pub fn diagram_id(index: usize) -> String {
    format!("mermaid-diagram-{index}")
}
