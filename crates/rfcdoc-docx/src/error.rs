//! DOCX packaging errors.

use std::path::PathBuf;

/// Error while producing a DOCX package.
#[derive(Debug, thiserror::Error)]
pub enum DocxError {
    /// A fixed template part is absent from the template directory.
    #[error("template part {part} not found in {}", dir.display())]
    MissingTemplatePart { part: &'static str, dir: PathBuf },

    /// A template part exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the archive failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
