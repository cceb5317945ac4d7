//! [`DocumentWriter`] implementation producing a DOCX package.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rfcdoc_renderer::{
    DocumentWriter, Justification, ListKind, MetaSlug, Metadata, Paragraph, ParagraphStyle,
    Phase, TableUnit,
};

use crate::body::{Block, BodyBuilder, ParagraphBlock, Run, TableBlock, serialize_document};
use crate::error::DocxError;
use crate::package::write_package;
use crate::properties::CoreProperties;
use crate::template::Template;

/// Default `w:lang` for non-verbatim runs.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Numbering definition ids in the template's `word/numbering.xml`.
const UNORDERED_NUM_ID: u32 = 1;
const ORDERED_NUM_ID: u32 = 2;

/// Metadata echoed into the body as `Label: value` paragraphs.
const ECHOED_SLUGS: [MetaSlug; 9] = [
    MetaSlug::Category,
    MetaSlug::Obsoletes,
    MetaSlug::Updates,
    MetaSlug::DocName,
    MetaSlug::Ipr,
    MetaSlug::SubmissionType,
    MetaSlug::Area,
    MetaSlug::Workgroup,
    MetaSlug::Keywords,
];

/// DOCX backend.
///
/// Blocks are accumulated in memory; the template is only read at
/// [`finalize`](DocumentWriter::finalize), so a missing template fails the
/// run without leaving a partial artifact.
#[derive(Debug)]
pub struct DocxWriter {
    template_dir: PathBuf,
    language: String,
    timestamp: Option<DateTime<Utc>>,
    metadata: Metadata,
    body: BodyBuilder,
}

impl DocxWriter {
    #[must_use]
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            language: DEFAULT_LANGUAGE.to_owned(),
            timestamp: None,
            metadata: Metadata::new(),
            body: BodyBuilder::new(),
        }
    }

    /// Language tag for non-verbatim runs.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Fixed "now" for the document properties instead of the clock.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Blocks emitted so far.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        self.body.blocks()
    }

    fn paragraph_block(&self, paragraph: Paragraph) -> ParagraphBlock {
        let code = paragraph.style == ParagraphStyle::Code;
        ParagraphBlock {
            style: style_name(paragraph.style),
            justification: paragraph.justification.map(justification_value),
            numbering: paragraph.numbering.map(|numbering| {
                let num_id = match numbering.kind {
                    ListKind::Unordered => UNORDERED_NUM_ID,
                    ListKind::Ordered => ORDERED_NUM_ID,
                };
                (num_id, numbering.level)
            }),
            run: Run {
                text: paragraph.text,
                language: (!code).then(|| self.language.clone()),
                char_style: code.then(|| style_name(ParagraphStyle::Code)),
                bold: paragraph.style == ParagraphStyle::DefinitionTerm,
            },
        }
    }
}

impl DocumentWriter for DocxWriter {
    type Output = Vec<u8>;
    type Error = DocxError;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn emit_paragraph(&mut self, _phase: Phase, paragraph: Paragraph) {
        let block = self.paragraph_block(paragraph);
        self.body.push(Block::Paragraph(block));
    }

    fn new_table(&mut self, _phase: Phase, table: TableUnit) {
        self.body.push(Block::Table(TableBlock { rows: table.rows }));
        if let Some(caption) = table.caption {
            let block = self.paragraph_block(Paragraph {
                text: caption,
                style: ParagraphStyle::Caption,
                justification: Some(Justification::Center),
                numbering: None,
                verbatim: false,
            });
            self.body.push(Block::Paragraph(block));
        }
    }

    fn on_metadata(&mut self, phase: Phase, slug: MetaSlug, value: &str) {
        if ECHOED_SLUGS.contains(&slug) {
            let block = self.paragraph_block(Paragraph {
                text: format!("{}: {value}", slug.label()),
                style: ParagraphStyle::Normal,
                justification: None,
                numbering: None,
                verbatim: false,
            });
            tracing::debug!(?phase, slug = slug.key(), "Echoing metadata");
            self.body.push(Block::Paragraph(block));
        }
    }

    fn finalize(self) -> Result<Vec<u8>, DocxError> {
        let template = Template::load(&self.template_dir)?;
        let now = self.timestamp.unwrap_or_else(Utc::now);
        let document_xml = serialize_document(self.body.blocks());
        let core_xml = CoreProperties::from_metadata(&self.metadata, now).to_xml();
        write_package(&template, &document_xml, &core_xml)
    }
}

/// Template style id for a paragraph style.
fn style_name(style: ParagraphStyle) -> String {
    match style {
        ParagraphStyle::Abstract => "IntenseQuote".to_owned(),
        ParagraphStyle::Reference | ParagraphStyle::DefinitionTerm => "Normal".to_owned(),
        other => other.name(),
    }
}

fn justification_value(justification: Justification) -> &'static str {
    match justification {
        Justification::Left => "left",
        Justification::Center => "center",
        Justification::Right => "right",
        Justification::Both => "both",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rfcdoc_renderer::{FigureUnit, Numbering, ParagraphUnit, TableRow};

    fn paragraphs(writer: &DocxWriter) -> Vec<&ParagraphBlock> {
        writer
            .blocks()
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(p),
                Block::Table(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_paragraph_translation() {
        let mut writer = DocxWriter::new("unused").with_language("fr-FR");
        writer.new_paragraph(
            Phase::Middle,
            ParagraphUnit::new("item")
                .style(ParagraphStyle::ListParagraph)
                .numbered(Some(Numbering::top(ListKind::Ordered))),
        );
        writer.new_paragraph(
            Phase::Front,
            ParagraphUnit::new("J. Doe").justify(Justification::Right),
        );

        let p = paragraphs(&writer);
        assert_eq!(p[0].style, "ListParagraph");
        assert_eq!(p[0].numbering, Some((ORDERED_NUM_ID, 0)));
        assert_eq!(p[0].run.language.as_deref(), Some("fr-FR"));
        assert_eq!(p[1].justification, Some("right"));
    }

    #[test]
    fn test_figure_lines_are_code_runs() {
        let mut writer = DocxWriter::new("unused");
        writer.new_figure(
            Phase::Middle,
            FigureUnit {
                lines: vec!["  +---+".to_owned(), String::new()],
                caption: Some("Box".to_owned()),
            },
        );

        let p = paragraphs(&writer);
        assert_eq!(p.len(), 3);
        assert_eq!(p[0].style, "Code");
        assert_eq!(p[0].run.text, "  +---+");
        assert_eq!(p[0].run.language, None);
        assert_eq!(p[0].run.char_style.as_deref(), Some("Code"));
        assert_eq!(p[1].run.text, "");
        assert_eq!(p[2].style, "Caption");
        assert_eq!(p[2].justification, Some("center"));
    }

    #[test]
    fn test_abstract_and_terms_styles() {
        let mut writer = DocxWriter::new("unused");
        writer.new_paragraph(
            Phase::Front,
            ParagraphUnit::new("Summary.").style(ParagraphStyle::Abstract),
        );
        writer.new_paragraph(
            Phase::Middle,
            ParagraphUnit::new("Term").style(ParagraphStyle::DefinitionTerm),
        );

        let p = paragraphs(&writer);
        assert_eq!(p[0].style, "IntenseQuote");
        assert_eq!(p[1].style, "Normal");
        assert!(p[1].run.bold);
        assert_eq!(writer.metadata().abstract_paragraphs(), ["Summary."]);
    }

    #[test]
    fn test_table_with_caption() {
        let mut writer = DocxWriter::new("unused");
        writer.new_table(
            Phase::Middle,
            TableUnit {
                rows: vec![TableRow {
                    header: true,
                    cells: vec!["A".to_owned()],
                }],
                caption: Some("Options".to_owned()),
            },
        );

        assert!(matches!(writer.blocks()[0], Block::Table(_)));
        let p = paragraphs(&writer);
        assert_eq!(p[0].style, "Caption");
        assert_eq!(p[0].run.text, "Options");
    }

    #[test]
    fn test_metadata_echo() {
        let mut writer = DocxWriter::new("unused");
        writer.set_metadata(Phase::Front, MetaSlug::Category, "std");
        writer.set_metadata(Phase::Front, MetaSlug::Title, "Not echoed");
        writer.set_metadata(Phase::Front, MetaSlug::Workgroup, " Network WG ");

        let texts: Vec<&str> = paragraphs(&writer).iter().map(|p| p.run.text.as_str()).collect();
        assert_eq!(texts, ["Category: std", "Workgroup: Network WG"]);
        assert_eq!(writer.metadata().get(MetaSlug::Title), Some("Not echoed"));
    }

    #[test]
    fn test_finalize_without_template_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let writer = DocxWriter::new(temp.path().join("missing"));
        let err = writer.finalize().unwrap_err();
        assert!(matches!(
            err,
            DocxError::MissingTemplatePart {
                part: "[Content_Types].xml",
                ..
            }
        ));
    }
}
