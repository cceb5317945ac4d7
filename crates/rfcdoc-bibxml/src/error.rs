//! Error types for reference resolution.

/// Error while resolving an external reference.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The anchor's namespace has no configured source.
    #[error("no bibxml source for namespace {namespace:?}")]
    UnknownNamespace { namespace: String },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Server returned an error status.
    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Fetched document is not well-formed XML.
    #[error("invalid reference XML: {0}")]
    Parse(#[from] rfcdoc_renderer::ParseError),

    /// Fetched document holds no `reference` element.
    #[error("no reference element in {url}")]
    NoReference { url: String },
}
