//! Fixed DOCX template parts.

use std::path::{Path, PathBuf};

use crate::error::DocxError;

/// Package parts copied verbatim from the template directory.
pub const TEMPLATE_PARTS: [&str; 10] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "docProps/app.xml",
    "word/fontTable.xml",
    "word/settings.xml",
    "word/numbering.xml",
    "word/webSettings.xml",
    "word/styles.xml",
    "word/theme/theme1.xml",
    "word/_rels/document.xml.rels",
];

/// Template parts loaded into memory.
#[derive(Clone, Debug)]
pub struct Template {
    dir: PathBuf,
    parts: Vec<(&'static str, Vec<u8>)>,
}

impl Template {
    /// Read every part of [`TEMPLATE_PARTS`] from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DocxError::MissingTemplatePart`] for an absent part and
    /// [`DocxError::Io`] when a part cannot be read.
    pub fn load(dir: &Path) -> Result<Self, DocxError> {
        let mut parts = Vec::with_capacity(TEMPLATE_PARTS.len());
        for part in TEMPLATE_PARTS {
            let path = dir.join(part);
            match std::fs::read(&path) {
                Ok(bytes) => parts.push((part, bytes)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(DocxError::MissingTemplatePart {
                        part,
                        dir: dir.to_path_buf(),
                    });
                }
                Err(source) => return Err(DocxError::Io { path, source }),
            }
        }
        tracing::debug!(dir = %dir.display(), "Loaded DOCX template");
        Ok(Self {
            dir: dir.to_path_buf(),
            parts,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parts in archive order as `(name, bytes)`.
    #[must_use]
    pub fn parts(&self) -> &[(&'static str, Vec<u8>)] {
        &self.parts
    }
}
