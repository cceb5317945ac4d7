//! Error types for document parsing and rendering.

/// Error while parsing an RFC XML document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// XML syntax error.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Encoding error while decoding names or text.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Input contained no root element.
    #[error("document has no root element")]
    NoRoot,

    /// Input ended with open elements.
    #[error("document ended with {0} unclosed element(s)")]
    Unclosed(usize),
}

/// Error while finalizing the markup output.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    /// Formatting into the output buffer failed.
    #[error("formatting error")]
    Fmt(#[from] std::fmt::Error),
}
