//! CLI error types.

use rfcdoc_bibxml::ResolveError;
use rfcdoc_config::ConfigError;
use rfcdoc_docx::DocxError;
use rfcdoc_renderer::{MarkdownError, ParseError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch input: {0}")]
    Fetch(#[from] ResolveError),

    #[error("invalid input XML: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Docx(#[from] DocxError),

    #[error("{0}")]
    Markdown(#[from] MarkdownError),

    #[error("{0}")]
    Validation(String),
}
