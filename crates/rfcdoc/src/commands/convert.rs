//! `rfcdoc convert` command implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, ValueEnum};
use rfcdoc_bibxml::{BibxmlResolver, HttpTransport, Transport};
use rfcdoc_config::{CliSettings, Config};
use rfcdoc_docx::DocxWriter;
use rfcdoc_renderer::{
    DocumentWriter, ExternalReferences, MarkdownWriter, SourceNode, WalkReport, Walker,
    parse_document,
};

use crate::error::CliError;
use crate::output::Output;

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Docx,
    Markdown,
}

impl Format {
    /// `.md`/`.markdown` outputs are Markdown, anything else DOCX.
    fn from_output(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") => {
                Self::Markdown
            }
            _ => Self::Docx,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Markdown => "md",
        }
    }
}

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Input XML file or http(s) URL.
    input: String,

    /// Output file (default: input name with the format's extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: inferred from the output extension).
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// DOCX template directory (overrides config).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Do not fetch external references.
    #[arg(long)]
    no_fetch: bool,

    /// Number middle-section headings.
    #[arg(long)]
    numbered: bool,

    /// Markdown wrap width (overrides config).
    #[arg(long)]
    wrap_width: Option<usize>,

    /// Path to configuration file (default: auto-discover rfcdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            template_dir: self.template.clone(),
            fetch: self.no_fetch.then_some(false),
            wrap_width: self.wrap_width,
            numbered_headings: self.numbered.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let timeout = Duration::from_secs(config.references.timeout_secs);

        let (format, output_path) = self.resolve_output()?;
        output.info(&format!("Input: {}", self.input));
        output.info(&format!("Output: {}", output_path.display()));

        let xml = read_input(&self.input, timeout)?;
        let root = parse_document(&xml)?;

        let mut resolver = config.references.fetch.then(|| {
            config.references.sources.iter().fold(
                BibxmlResolver::new(HttpTransport::new(timeout)),
                |resolver, (namespace, base)| resolver.with_source(namespace, base),
            )
        });
        let references = resolver
            .as_mut()
            .map(|resolver| resolver as &mut dyn ExternalReferences);
        let numbered = config.headings.numbered;

        let (bytes, report) = match format {
            Format::Docx => {
                let writer = DocxWriter::new(&config.docx_resolved.template_dir)
                    .with_language(&config.docx_resolved.language);
                render(writer, &root, references, numbered)?
            }
            Format::Markdown => {
                let writer = MarkdownWriter::new().with_wrap_width(config.markdown.wrap_width);
                let (markdown, report) = render(writer, &root, references, numbered)?;
                (markdown.into_bytes(), report)
            }
        };

        for diagnostic in &report.diagnostics {
            output.warning(&format!("Warning: {diagnostic}"));
        }

        std::fs::write(&output_path, bytes)?;
        output.success(&format!("Wrote {}", output_path.display()));
        Ok(())
    }

    /// Output format and path from the flags, the output extension or the
    /// input name.
    fn resolve_output(&self) -> Result<(Format, PathBuf), CliError> {
        if let Some(path) = &self.output {
            let format = self.format.unwrap_or_else(|| Format::from_output(path));
            return Ok((format, path.clone()));
        }
        let format = self.format.unwrap_or(Format::Docx);
        let stem = input_stem(&self.input).ok_or_else(|| {
            CliError::Validation(format!(
                "cannot derive an output name from {}; use --output",
                self.input
            ))
        })?;
        Ok((format, PathBuf::from(format!("{stem}.{}", format.extension()))))
    }
}

/// Walk `root` into `writer` and finalize it.
///
/// The artifact is only returned once finalize succeeded.
fn render<W>(
    mut writer: W,
    root: &SourceNode,
    references: Option<&mut dyn ExternalReferences>,
    numbered: bool,
) -> Result<(W::Output, WalkReport), CliError>
where
    W: DocumentWriter,
    CliError: From<W::Error>,
{
    let mut walker = Walker::new(&mut writer).with_numbered_headings(numbered);
    if let Some(references) = references {
        walker = walker.with_references(references);
    }
    let report = walker.walk(root);
    tracing::info!(diagnostics = report.diagnostics.len(), "Walk complete");
    Ok((writer.finalize()?, report))
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn read_input(input: &str, timeout: Duration) -> Result<String, CliError> {
    if is_url(input) {
        return Ok(HttpTransport::new(timeout).get(input)?);
    }
    Ok(std::fs::read_to_string(input)?)
}

/// File stem of a path or of the last URL segment.
fn input_stem(input: &str) -> Option<String> {
    let name = if is_url(input) {
        let (_, rest) = input.split_once("://")?;
        let (_, path) = rest.split_once('/')?;
        path.split(['?', '#']).next()?.rsplit('/').next()?
    } else {
        Path::new(input).file_name()?.to_str()?
    };
    let stem = Path::new(name).file_stem()?.to_str()?;
    (!stem.is_empty()).then(|| stem.to_owned())
}
