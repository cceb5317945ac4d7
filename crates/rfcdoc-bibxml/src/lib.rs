//! bibxml reference resolution for rfcdoc.
//!
//! [`BibxmlResolver`] implements [`ExternalReferences`] for the walker: an
//! anchor such as `RFC.2119` is mapped through its namespace (`RFC`) to a
//! base location, fetched once through a [`Transport`], parsed, and its
//! `reference` element handed back. Failures are logged and yield `None`.
//!
//! [`ExternalReferences`]: rfcdoc_renderer::ExternalReferences

mod error;
mod namespace;
mod resolver;
mod transport;

pub use error::ResolveError;
pub use namespace::{DEFAULT_SOURCES, namespace_of};
pub use resolver::BibxmlResolver;
pub use transport::{DEFAULT_TIMEOUT, HttpTransport, Transport};
