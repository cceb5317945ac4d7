//! In-memory zip packaging.

use std::io::{Cursor, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::DocxError;
use crate::template::Template;

/// Generated body part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Generated properties part.
pub const CORE_PART: &str = "docProps/core.xml";

/// Zip the template parts with the generated body and core properties.
///
/// # Errors
///
/// Returns [`DocxError::Zip`] if the archive cannot be written.
pub fn write_package(
    template: &Template,
    document_xml: &str,
    core_xml: &str,
) -> Result<Vec<u8>, DocxError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in template.parts() {
        zip.start_file(*name, deflated)?;
        zip.write_all(bytes).map_err(ZipError::Io)?;
    }
    zip.start_file(DOCUMENT_PART, deflated)?;
    zip.write_all(document_xml.as_bytes()).map_err(ZipError::Io)?;
    zip.start_file(CORE_PART, deflated)?;
    zip.write_all(core_xml.as_bytes()).map_err(ZipError::Io)?;

    let bytes = zip.finish()?.into_inner();
    tracing::info!(
        parts = template.parts().len() + 2,
        bytes = bytes.len(),
        "Wrote DOCX package"
    );
    Ok(bytes)
}
