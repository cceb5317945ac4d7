//! Memoized anchor resolution against bibxml sources.

use std::collections::HashMap;

use rfcdoc_renderer::{ExternalReferences, SourceNode, Tag, parse_document};

use crate::error::ResolveError;
use crate::namespace::{DEFAULT_SOURCES, namespace_of};
use crate::transport::{HttpTransport, Transport};

/// Resolves reference anchors such as `RFC.2119` to `reference` nodes.
///
/// Every anchor is fetched at most once; failures are remembered too.
pub struct BibxmlResolver<T: Transport = HttpTransport> {
    transport: T,
    sources: HashMap<String, String>,
    cache: HashMap<String, Option<SourceNode>>,
}

impl<T: Transport> BibxmlResolver<T> {
    /// Resolver with the built-in namespace table.
    pub fn new(transport: T) -> Self {
        let sources = DEFAULT_SOURCES
            .iter()
            .map(|(namespace, base)| ((*namespace).to_owned(), (*base).to_owned()))
            .collect();
        Self {
            transport,
            sources,
            cache: HashMap::new(),
        }
    }

    /// Add or replace the base location of a namespace.
    #[must_use]
    pub fn with_source(mut self, namespace: impl Into<String>, base: impl Into<String>) -> Self {
        self.sources.insert(namespace.into(), base.into());
        self
    }

    /// Fetch URL for an anchor.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownNamespace`] if no source matches.
    pub fn url_for(&self, anchor: &str) -> Result<String, ResolveError> {
        let namespace = namespace_of(anchor).unwrap_or(anchor);
        let base = self
            .sources
            .get(namespace)
            .or_else(|| self.sources.get(&namespace.to_ascii_uppercase()))
            .ok_or_else(|| ResolveError::UnknownNamespace {
                namespace: namespace.to_owned(),
            })?;
        Ok(format!("{base}{anchor}.xml"))
    }

    /// Fetch and parse one anchor, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] for an unknown namespace, a transport
    /// failure, malformed XML or a document without a reference.
    pub fn fetch(&self, anchor: &str) -> Result<SourceNode, ResolveError> {
        let url = self.url_for(anchor)?;
        let body = self.transport.get(&url)?;
        let root = parse_document(&body)?;
        take_reference(root).ok_or(ResolveError::NoReference { url })
    }

    /// Number of anchors looked up so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl<T: Transport> ExternalReferences for BibxmlResolver<T> {
    fn resolve_external(&mut self, anchor: &str) -> Option<SourceNode> {
        if let Some(cached) = self.cache.get(anchor) {
            return cached.clone();
        }
        let resolved = match self.fetch(anchor) {
            Ok(node) => Some(node),
            Err(e) => {
                tracing::warn!(anchor, error = %e, "Failed to resolve reference");
                None
            }
        };
        self.cache.insert(anchor.to_owned(), resolved.clone());
        resolved
    }
}

/// The root itself when it is a reference, else its first reference
/// descendant.
fn take_reference(root: SourceNode) -> Option<SourceNode> {
    if matches!(root.tag, Tag::Reference | Tag::ReferenceGroup) {
        return Some(root);
    }
    root.find(&Tag::ReferenceGroup)
        .or_else(|| root.find(&Tag::Reference))
        .cloned()
}
