//! RFC XML tree walker with pluggable document writers.
//!
//! This crate parses RFC/Internet-Draft XML (v2 and v3 vocabularies) into a
//! [`SourceNode`] tree and walks it with a [`Walker`], which turns every
//! block-level construct into calls on a [`DocumentWriter`].
//!
//! # Architecture
//!
//! - [`Walker`]: recursive traversal owning heading depth, numbering and
//!   inline-text accumulation
//! - [`DocumentWriter`]: the writer contract; shared behavior (empty-paragraph
//!   policy, abstract capture, figures as verbatim lines) lives in its
//!   provided methods
//! - [`MarkdownWriter`]: kramdown-rfc style Markdown backend
//!
//! The DOCX package backend lives in the `rfcdoc-docx` crate and bibxml
//! reference fetching in `rfcdoc-bibxml`.
//!
//! # Example
//!
//! ```
//! use rfcdoc_renderer::{DocumentWriter, MarkdownWriter, Walker, parse_document};
//!
//! let root = parse_document(r#"<section title="Intro"><t>Hello.</t></section>"#).unwrap();
//! let mut writer = MarkdownWriter::new();
//! let report = Walker::new(&mut writer).walk(&root);
//! assert!(report.diagnostics.is_empty());
//! let markdown = writer.finalize().unwrap();
//! assert!(markdown.contains("# Intro\n\nHello."));
//! ```

mod error;
mod markdown;
mod metadata;
mod parser;
mod reference;
mod tree;
mod util;
mod walker;
mod writer;

pub use error::{MarkdownError, ParseError};
pub use markdown::{DEFAULT_WRAP_WIDTH, MarkdownWriter};
pub use metadata::{MetaSlug, Metadata, SlotPolicy};
pub use parser::parse_document;
pub use reference::{AuthorName, ExternalReferences, ReferenceEntry, author_name, format_reference};
pub use tree::{Content, SourceNode, Tag};
pub use util::{collapse_whitespace, wrap_text};
pub use walker::{WalkReport, Walker};
pub use writer::{
    DocumentWriter, FigureUnit, InlineKind, Justification, ListKind, Numbering, Paragraph,
    ParagraphStyle, ParagraphUnit, Phase, TableRow, TableUnit,
};
