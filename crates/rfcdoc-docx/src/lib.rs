//! DOCX package backend for rfcdoc.
//!
//! [`DocxWriter`] implements the renderer's [`DocumentWriter`] contract. It
//! accumulates body blocks during the walk and, on finalize, combines the
//! serialized `word/document.xml` and a generated `docProps/core.xml` with
//! the fixed parts of a template directory into a zip archive.
//!
//! ```no_run
//! use rfcdoc_docx::DocxWriter;
//! use rfcdoc_renderer::{DocumentWriter, Walker, parse_document};
//!
//! let root = parse_document("<rfc><middle><t>Hi.</t></middle></rfc>")?;
//! let mut writer = DocxWriter::new("template");
//! Walker::new(&mut writer).walk(&root);
//! let bytes = writer.finalize()?;
//! std::fs::write("draft.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`DocumentWriter`]: rfcdoc_renderer::DocumentWriter

mod body;
mod error;
mod package;
mod properties;
mod template;
mod writer;

pub use body::{Block, BodyBuilder, ParagraphBlock, Run, TableBlock, serialize_document};
pub use error::DocxError;
pub use package::{CORE_PART, DOCUMENT_PART, write_package};
pub use properties::{CoreProperties, LAST_MODIFIED_BY, parse_document_date};
pub use template::{TEMPLATE_PARTS, Template};
pub use writer::{DEFAULT_LANGUAGE, DocxWriter};
