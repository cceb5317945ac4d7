//! Front matter: title, authors, date and document-level metadata.

use super::{Scope, Walker};
use crate::metadata::MetaSlug;
use crate::reference::author_name;
use crate::tree::{SourceNode, Tag};
use crate::util::collapse_whitespace;
use crate::writer::{DocumentWriter, Justification, ParagraphStyle, ParagraphUnit, Phase};

/// `rfc` attributes recorded as metadata.
const RFC_ATTRIBUTES: [(&str, MetaSlug); 6] = [
    ("category", MetaSlug::Category),
    ("obsoletes", MetaSlug::Obsoletes),
    ("updates", MetaSlug::Updates),
    ("docName", MetaSlug::DocName),
    ("ipr", MetaSlug::Ipr),
    ("submissionType", MetaSlug::SubmissionType),
];

impl<W: DocumentWriter> Walker<'_, W> {
    pub(super) fn rfc_attributes(&mut self, root: &SourceNode) {
        for (attr, slug) in RFC_ATTRIBUTES {
            if let Some(value) = root.non_empty_attr(attr) {
                self.writer.set_metadata(Phase::Front, slug, value);
            }
        }
    }

    pub(super) fn title(&mut self, node: &SourceNode, scope: &Scope) {
        let text = collapse_whitespace(&node.text_content());
        if text.is_empty() {
            self.diagnose(node, "empty title");
            return;
        }
        self.writer.set_metadata(scope.phase, MetaSlug::Title, &text);
        self.writer.new_paragraph(
            scope.phase,
            ParagraphUnit::new(text).style(ParagraphStyle::Title),
        );
    }

    pub(super) fn author(&mut self, node: &SourceNode, scope: &Scope) {
        let Some(name) = author_name(node) else {
            self.diagnose(node, "author has no name or organization");
            return;
        };
        let display = name.with_affiliation();
        self.writer.new_paragraph(
            scope.phase,
            ParagraphUnit::new(display.clone()).justify(Justification::Right),
        );
        self.writer.set_metadata(scope.phase, MetaSlug::Authors, &display);
    }

    /// `day month year`, any part optional.
    pub(super) fn date(&mut self, node: &SourceNode, scope: &Scope) {
        let text = ["day", "month", "year"]
            .iter()
            .filter_map(|attr| node.non_empty_attr(attr))
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            tracing::debug!("Date without day, month or year");
            return;
        }
        self.writer.new_paragraph(
            scope.phase,
            ParagraphUnit::new(text.clone()).justify(Justification::Right),
        );
        self.writer.set_metadata(scope.phase, MetaSlug::Date, &text);
    }

    /// `area`, `workgroup` and `keyword`: metadata only.
    pub(super) fn front_text(&mut self, node: &SourceNode, scope: &Scope) {
        let slug = match node.tag {
            Tag::Area => MetaSlug::Area,
            Tag::Workgroup => MetaSlug::Workgroup,
            _ => MetaSlug::Keywords,
        };
        let text = collapse_whitespace(&node.text_content());
        if text.is_empty() {
            self.diagnose(node, "empty value");
            return;
        }
        self.writer.set_metadata(scope.phase, slug, &text);
    }

    /// `seriesInfo name="Internet-Draft"` names the draft.
    pub(super) fn series_info(&mut self, node: &SourceNode, scope: &Scope) {
        match (node.attr("name"), node.non_empty_attr("value")) {
            (Some("Internet-Draft"), Some(value)) => {
                self.writer.set_metadata(scope.phase, MetaSlug::DocName, value);
            }
            (name, _) => tracing::debug!(name = ?name, "Ignoring seriesInfo"),
        }
    }

    /// Abstract paragraphs carry the `Abstract` style.
    pub(super) fn abstract_block(&mut self, node: &SourceNode, scope: &Scope) {
        self.text_run(node, &scope.styled(ParagraphStyle::Abstract, None));
    }
}
