//! Writer contract shared by every output backend.
//!
//! The walker speaks only in [`ParagraphUnit`], [`TableUnit`] and
//! [`FigureUnit`] values; a [`DocumentWriter`] turns them into one output
//! format. Behavior common to all backends (empty-paragraph policy,
//! whitespace normalization, abstract capture, figures as verbatim lines)
//! lives in the provided methods so backends only override what differs.

use crate::metadata::{MetaSlug, Metadata};
use crate::util::collapse_whitespace;

/// Part of the document a unit belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    Front,
    #[default]
    Middle,
    Back,
}

/// Paragraph style names understood by the backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    Title,
    /// Section heading at the given depth (1-based).
    Heading(u8),
    ListParagraph,
    Quote,
    Code,
    Abstract,
    Reference,
    Caption,
    DefinitionTerm,
}

impl ParagraphStyle {
    /// Canonical style name, e.g. `Heading2`.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Normal => "Normal".to_owned(),
            Self::Title => "Title".to_owned(),
            Self::Heading(level) => format!("Heading{level}"),
            Self::ListParagraph => "ListParagraph".to_owned(),
            Self::Quote => "Quote".to_owned(),
            Self::Code => "Code".to_owned(),
            Self::Abstract => "Abstract".to_owned(),
            Self::Reference => "Reference".to_owned(),
            Self::Caption => "Caption".to_owned(),
            Self::DefinitionTerm => "DefinitionTerm".to_owned(),
        }
    }
}

/// Horizontal alignment of a paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Justification {
    Left,
    Center,
    Right,
    Both,
}

/// Kind of list a numbered paragraph belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Numbering descriptor attached to list paragraphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Numbering {
    pub kind: ListKind,
    pub level: u8,
}

impl Numbering {
    /// Top-level numbering of the given kind.
    #[must_use]
    pub fn top(kind: ListKind) -> Self {
        Self { kind, level: 0 }
    }
}

/// Inline markup the walker resolves into run text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InlineKind {
    Bcp14,
    Tt,
    Em,
    Strong,
    Sub,
    Sup,
}

/// Paragraph as handed over by the walker, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParagraphUnit {
    /// Raw text; `None` means nothing to emit.
    pub text: Option<String>,
    pub style: ParagraphStyle,
    pub justification: Option<Justification>,
    pub numbering: Option<Numbering>,
    /// Keep spacing exactly as given.
    pub preserve_whitespace: bool,
    /// Drop the unit when its normalized text is empty.
    pub drop_if_empty: bool,
}

impl ParagraphUnit {
    /// Normal paragraph with the default drop-if-empty policy.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            style: ParagraphStyle::Normal,
            justification: None,
            numbering: None,
            preserve_whitespace: false,
            drop_if_empty: true,
        }
    }

    /// Paragraph with no text at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            text: None,
            ..Self::new("")
        }
    }

    /// Verbatim `Code` line: spacing kept, never dropped.
    #[must_use]
    pub fn verbatim(line: impl Into<String>) -> Self {
        Self {
            style: ParagraphStyle::Code,
            preserve_whitespace: true,
            drop_if_empty: false,
            ..Self::new(line)
        }
    }

    #[must_use]
    pub fn style(mut self, style: ParagraphStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn justify(mut self, justification: Justification) -> Self {
        self.justification = Some(justification);
        self
    }

    #[must_use]
    pub fn numbered(mut self, numbering: Option<Numbering>) -> Self {
        self.numbering = numbering;
        self
    }

    /// Apply the null, whitespace and empty-paragraph rules.
    ///
    /// Returns `None` when the unit must not be emitted.
    #[must_use]
    pub fn normalize(self) -> Option<Paragraph> {
        let raw = self.text?;
        let text = if self.preserve_whitespace {
            raw
        } else {
            collapse_whitespace(&raw)
        };
        if self.drop_if_empty && text.trim().is_empty() {
            return None;
        }
        Some(Paragraph {
            text,
            style: self.style,
            justification: self.justification,
            numbering: self.numbering,
            verbatim: self.preserve_whitespace,
        })
    }
}

/// Normalized paragraph ready for a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub style: ParagraphStyle,
    pub justification: Option<Justification>,
    pub numbering: Option<Numbering>,
    /// Text is verbatim and must not be re-spaced or tagged with a language.
    pub verbatim: bool,
}

/// One table row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRow {
    pub header: bool,
    pub cells: Vec<String>,
}

/// Table with ordered header/body rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableUnit {
    pub rows: Vec<TableRow>,
    pub caption: Option<String>,
}

/// Verbatim figure body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FigureUnit {
    pub lines: Vec<String>,
    pub caption: Option<String>,
}

/// Output backend driven by the walker.
pub trait DocumentWriter {
    /// Finished artifact.
    type Output;
    /// Fatal finalize error.
    type Error: std::error::Error;

    fn metadata(&self) -> &Metadata;

    fn metadata_mut(&mut self) -> &mut Metadata;

    /// Emit a normalized paragraph.
    fn emit_paragraph(&mut self, phase: Phase, paragraph: Paragraph);

    /// Emit a table.
    fn new_table(&mut self, phase: Phase, table: TableUnit);

    /// Produce the final artifact.
    ///
    /// # Errors
    ///
    /// Backend-specific resource failures.
    fn finalize(self) -> Result<Self::Output, Self::Error>
    where
        Self: Sized;

    /// Record a metadata value and notify [`on_metadata`](Self::on_metadata)
    /// when the store accepted it.
    fn set_metadata(&mut self, phase: Phase, slug: MetaSlug, value: &str) {
        if self.metadata_mut().record(slug, value) {
            self.on_metadata(phase, slug, value.trim());
        }
    }

    /// Hook for backends that render metadata as it arrives.
    fn on_metadata(&mut self, _phase: Phase, _slug: MetaSlug, _value: &str) {}

    /// Normalize a paragraph and emit it. Dropped units are silent no-ops.
    fn new_paragraph(&mut self, phase: Phase, unit: ParagraphUnit) {
        let Some(paragraph) = unit.normalize() else {
            return;
        };
        if paragraph.style == ParagraphStyle::Abstract {
            self.metadata_mut().push_abstract(&paragraph.text);
        }
        self.emit_paragraph(phase, paragraph);
    }

    /// Emit a figure as one verbatim `Code` paragraph per line, followed by a
    /// centered caption.
    fn new_figure(&mut self, phase: Phase, figure: FigureUnit) {
        for line in figure.lines {
            self.new_paragraph(phase, ParagraphUnit::verbatim(line));
        }
        if let Some(caption) = figure.caption {
            self.new_paragraph(
                phase,
                ParagraphUnit::new(caption)
                    .style(ParagraphStyle::Caption)
                    .justify(Justification::Center),
            );
        }
    }

    /// Render inline markup into run text.
    fn inline(&self, _kind: InlineKind, text: &str) -> String {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_collapses_whitespace() {
        let p = ParagraphUnit::new("This   is \n a test.").normalize().unwrap();
        assert_eq!(p.text, "This is a test.");
        assert!(!p.verbatim);
    }

    #[test]
    fn test_normalize_drops_empty() {
        assert_eq!(ParagraphUnit::new("  \n\t ").normalize(), None);
        assert_eq!(ParagraphUnit::none().normalize(), None);
    }

    #[test]
    fn test_normalize_keeps_empty_when_asked() {
        let unit = ParagraphUnit {
            drop_if_empty: false,
            ..ParagraphUnit::new("   ")
        };
        assert_eq!(unit.normalize().unwrap().text, "");
    }

    #[test]
    fn test_verbatim_preserves_spacing() {
        let p = ParagraphUnit::verbatim("  +--+  ").normalize().unwrap();
        assert_eq!(p.text, "  +--+  ");
        assert_eq!(p.style, ParagraphStyle::Code);
        assert!(p.verbatim);

        let blank = ParagraphUnit::verbatim("").normalize().unwrap();
        assert_eq!(blank.text, "");
    }

    #[test]
    fn test_style_names() {
        assert_eq!(ParagraphStyle::Heading(3).name(), "Heading3");
        assert_eq!(ParagraphStyle::ListParagraph.name(), "ListParagraph");
    }
}
