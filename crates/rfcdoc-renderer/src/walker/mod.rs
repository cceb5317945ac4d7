//! Recursive traversal of the source tree.
//!
//! The walker classifies every node, accumulates inline content into
//! paragraph units and hands each block-level unit to a [`DocumentWriter`].
//! Heading depth and numbering travel down the recursion inside a [`Scope`]
//! value, so siblings never observe each other's state.
//!
//! Structural anomalies never abort the walk: they are logged, collected in
//! the returned [`WalkReport`] and the offending node is skipped.

mod blocks;
mod front;
mod references;

use std::collections::HashSet;

use crate::reference::ExternalReferences;
use crate::tree::{Content, SourceNode, Tag};
use crate::util::collapse_whitespace;
use crate::writer::{DocumentWriter, InlineKind, Numbering, ParagraphStyle, ParagraphUnit, Phase};

/// Outcome of a walk.
#[derive(Clone, Debug, Default)]
pub struct WalkReport {
    /// Diagnostics for skipped or degraded nodes, in document order.
    pub diagnostics: Vec<String>,
}

/// Per-call traversal state.
#[derive(Clone, Debug)]
struct Scope {
    phase: Phase,
    /// Heading depth of the enclosing section (0 outside any section).
    depth: usize,
    /// Dotted section number of the enclosing section, empty when unnumbered.
    number: String,
    /// Style for text runs flushed in this scope.
    style: ParagraphStyle,
    numbering: Option<Numbering>,
}

impl Scope {
    fn new(phase: Phase) -> Self {
        Self {
            phase,
            depth: 0,
            number: String::new(),
            style: ParagraphStyle::Normal,
            numbering: None,
        }
    }

    /// Scope for the content of a nested section.
    fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            style: ParagraphStyle::Normal,
            numbering: None,
            ..self.clone()
        }
    }

    fn styled(&self, style: ParagraphStyle, numbering: Option<Numbering>) -> Self {
        Self {
            style,
            numbering,
            ..self.clone()
        }
    }
}

/// Document walker driving one [`DocumentWriter`].
///
/// # Example
///
/// ```ignore
/// let root = parse_document(xml)?;
/// let mut writer = MarkdownWriter::new();
/// let report = Walker::new(&mut writer).walk(&root);
/// let markdown = writer.finalize()?;
/// ```
pub struct Walker<'w, W: DocumentWriter> {
    writer: &'w mut W,
    references: Option<&'w mut dyn ExternalReferences>,
    numbered_headings: bool,
    resolved_anchors: HashSet<String>,
    diagnostics: Vec<String>,
}

impl<'w, W: DocumentWriter> Walker<'w, W> {
    #[must_use]
    pub fn new(writer: &'w mut W) -> Self {
        Self {
            writer,
            references: None,
            numbered_headings: false,
            resolved_anchors: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Resolve `xi:include` references through `references`.
    ///
    /// Without a resolver, includes are reported and skipped.
    #[must_use]
    pub fn with_references(mut self, references: &'w mut dyn ExternalReferences) -> Self {
        self.references = Some(references);
        self
    }

    /// Prefix middle-section headings with their dotted number (`1.`, `1.2.`).
    #[must_use]
    pub fn with_numbered_headings(mut self, numbered: bool) -> Self {
        self.numbered_headings = numbered;
        self
    }

    /// Walk a whole document.
    ///
    /// An `rfc` root contributes its attributes to the metadata and is split
    /// into front, middle and back phases. Any other root is walked as
    /// middle content.
    pub fn walk(mut self, root: &SourceNode) -> WalkReport {
        if root.tag == Tag::Rfc {
            self.rfc(root);
        } else {
            self.walk_node(root, Phase::Middle);
        }
        self.finish()
    }

    /// Walk a subtree in an explicit phase.
    pub fn walk_in(mut self, node: &SourceNode, phase: Phase) -> WalkReport {
        self.walk_node(node, phase);
        self.finish()
    }

    fn finish(self) -> WalkReport {
        WalkReport {
            diagnostics: self.diagnostics,
        }
    }

    fn walk_node(&mut self, node: &SourceNode, phase: Phase) {
        let scope = Scope::new(phase);
        match node.tag {
            Tag::Front | Tag::Middle | Tag::Back => self.container(node, &scope),
            _ => self.block(node, &scope),
        }
    }

    fn rfc(&mut self, root: &SourceNode) {
        self.rfc_attributes(root);
        for child in &root.children {
            let phase = match child.tag {
                Tag::Front => Phase::Front,
                Tag::Middle => Phase::Middle,
                Tag::Back => Phase::Back,
                _ => {
                    self.unsupported(child);
                    continue;
                }
            };
            tracing::debug!(phase = ?phase, "Walking document part");
            self.container(child, &Scope::new(phase));
        }
    }

    /// Walk the children of a section-like node, numbering nested sections.
    fn container(&mut self, node: &SourceNode, scope: &Scope) {
        let mut ordinal = 0;
        for child in &node.children {
            match child.tag {
                Tag::Section | Tag::References => {
                    ordinal += 1;
                    self.section(child, scope, Some(ordinal));
                }
                _ => self.block(child, scope),
            }
        }
    }

    /// Dispatch one block-level node.
    fn block(&mut self, node: &SourceNode, scope: &Scope) {
        match &node.tag {
            Tag::Section | Tag::Note | Tag::References => self.section(node, scope, None),
            Tag::Front | Tag::Middle | Tag::Back => self.container(node, scope),
            Tag::T | Tag::Preamble | Tag::Postamble => self.text_run(node, scope),
            Tag::List | Tag::Ol | Tag::Ul => self.list(node, scope),
            Tag::Dl => self.definition_list(node, scope),
            Tag::Figure => self.figure(node, scope),
            Tag::Artwork | Tag::SourceCode => self.bare_artwork(node, scope),
            Tag::Table | Tag::TextTable => self.table(node, scope),
            Tag::BlockQuote | Tag::Aside => self.quote(node, scope),
            Tag::Reference | Tag::ReferenceGroup => self.reference(node, scope, None),
            Tag::Include => self.include(node, scope, None),
            Tag::Title => self.title(node, scope),
            Tag::Author => self.author(node, scope),
            Tag::Date => self.date(node, scope),
            Tag::Area | Tag::Workgroup | Tag::Keyword => self.front_text(node, scope),
            Tag::SeriesInfo => self.series_info(node, scope),
            Tag::Abstract => self.abstract_block(node, scope),
            Tag::Boilerplate | Tag::Name | Tag::Br | Tag::VSpace => {}
            _ => self.unsupported(node),
        }
    }

    /// Section-like node: heading at `depth + 1`, then its content.
    fn section(&mut self, node: &SourceNode, scope: &Scope, ordinal: Option<usize>) {
        let mut inner = scope.nested();
        let numbered = self.numbered_headings
            && scope.phase == Phase::Middle
            && node.tag == Tag::Section
            && node.attr("numbered") != Some("false");
        inner.number = match ordinal {
            Some(ordinal) if numbered && scope.number.is_empty() => ordinal.to_string(),
            Some(ordinal) if numbered => format!("{}.{ordinal}", scope.number),
            _ => String::new(),
        };

        self.heading(node, &inner);
        if node.tag == Tag::References {
            self.references(node, &inner);
        } else {
            self.container(node, &inner);
        }
    }

    fn heading(&mut self, node: &SourceNode, scope: &Scope) {
        let Some(title) = section_title(node) else {
            self.diagnose(node, "section has no title");
            return;
        };
        let text = if scope.number.is_empty() {
            title
        } else {
            format!("{}. {title}", scope.number)
        };
        let level = u8::try_from(scope.depth).unwrap_or(u8::MAX);
        self.writer.new_paragraph(
            scope.phase,
            ParagraphUnit::new(text).style(ParagraphStyle::Heading(level)),
        );
    }

    /// Accumulate inline content into paragraphs.
    ///
    /// Block-level children flush the pending buffer first, are walked, and
    /// buffering resumes afterwards. The final buffer is always flushed.
    fn text_run(&mut self, node: &SourceNode, scope: &Scope) {
        let mut buffer = String::new();
        for piece in node.content() {
            match piece {
                Content::Text(text) => buffer.push_str(text),
                Content::Element(child) if is_block(&child.tag) => {
                    self.flush(&mut buffer, scope);
                    self.block(child, scope);
                }
                Content::Element(child) => {
                    let text = self.inline_element(child);
                    buffer.push_str(&text);
                }
            }
        }
        self.flush(&mut buffer, scope);
    }

    fn flush(&mut self, buffer: &mut String, scope: &Scope) {
        let text = std::mem::take(buffer);
        self.writer.new_paragraph(
            scope.phase,
            ParagraphUnit::new(text)
                .style(scope.style)
                .numbered(scope.numbering),
        );
    }

    /// Resolve an inline element to run text.
    fn inline_element(&mut self, node: &SourceNode) -> String {
        if matches!(node.tag, Tag::Xref | Tag::Relref | Tag::Eref) {
            return self.cross_reference(node);
        }
        let Some(kind) = inline_kind(&node.tag) else {
            self.unsupported(node);
            return String::new();
        };
        let inner = collapse_whitespace(&self.inline_content(node));
        if inner.is_empty() {
            return inner;
        }
        self.writer.inline(kind, &inner)
    }

    /// Inline content of a node, with nested paragraphs and line breaks
    /// folded into spaces.
    fn inline_content(&mut self, node: &SourceNode) -> String {
        let mut out = String::new();
        for piece in node.content() {
            match piece {
                Content::Text(text) => out.push_str(text),
                Content::Element(child) if matches!(child.tag, Tag::T | Tag::Br | Tag::VSpace) => {
                    out.push(' ');
                    let text = self.inline_content(child);
                    out.push_str(&text);
                }
                Content::Element(child) => {
                    let text = self.inline_element(child);
                    out.push_str(&text);
                }
            }
        }
        out
    }

    /// `[target]` when a target exists, else the element's own text.
    fn cross_reference(&mut self, node: &SourceNode) -> String {
        if let Some(target) = node.non_empty_attr("target") {
            return format!("[{}]", target.trim());
        }
        let text = collapse_whitespace(&node.text_content());
        if text.is_empty() {
            self.diagnose(node, "cross-reference has neither target nor text");
        }
        text
    }

    fn unsupported(&mut self, node: &SourceNode) {
        self.diagnose(node, "unsupported element skipped");
    }

    fn diagnose(&mut self, node: &SourceNode, message: &str) {
        tracing::warn!(element = %node.name, "{message}");
        self.diagnostics.push(format!("<{}>: {message}", node.name));
    }
}

/// Explicit `title` attribute, else the text of the first `name` child.
fn section_title(node: &SourceNode) -> Option<String> {
    node.non_empty_attr("title")
        .map(collapse_whitespace)
        .or_else(|| {
            node.child(&Tag::Name)
                .map(|name| collapse_whitespace(&name.text_content()))
        })
        .filter(|title| !title.is_empty())
}

/// Children that interrupt a text run.
fn is_block(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::T
            | Tag::List
            | Tag::Ol
            | Tag::Ul
            | Tag::Dl
            | Tag::Figure
            | Tag::Artwork
            | Tag::SourceCode
            | Tag::Table
            | Tag::TextTable
            | Tag::BlockQuote
            | Tag::Aside
            | Tag::Br
            | Tag::VSpace
    )
}

fn inline_kind(tag: &Tag) -> Option<InlineKind> {
    match tag {
        Tag::Bcp14 => Some(InlineKind::Bcp14),
        Tag::Tt => Some(InlineKind::Tt),
        Tag::Em => Some(InlineKind::Em),
        Tag::Strong => Some(InlineKind::Strong),
        Tag::Sub => Some(InlineKind::Sub),
        Tag::Sup => Some(InlineKind::Sup),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::convert::Infallible;

    use super::*;
    use crate::metadata::{MetaSlug, Metadata};
    use crate::parser::parse_document;
    use crate::writer::{Justification, ListKind, Paragraph, TableUnit};
    use pretty_assertions::assert_eq;

    /// Writer that records every unit it receives.
    #[derive(Default)]
    struct RecordingWriter {
        metadata: Metadata,
        paragraphs: Vec<(Phase, Paragraph)>,
        tables: Vec<TableUnit>,
    }

    impl RecordingWriter {
        fn texts(&self) -> Vec<&str> {
            self.paragraphs.iter().map(|(_, p)| p.text.as_str()).collect()
        }

        fn styles(&self) -> Vec<ParagraphStyle> {
            self.paragraphs.iter().map(|(_, p)| p.style).collect()
        }
    }

    impl DocumentWriter for RecordingWriter {
        type Output = Vec<(Phase, Paragraph)>;
        type Error = Infallible;

        fn metadata(&self) -> &Metadata {
            &self.metadata
        }

        fn metadata_mut(&mut self) -> &mut Metadata {
            &mut self.metadata
        }

        fn emit_paragraph(&mut self, phase: Phase, paragraph: Paragraph) {
            self.paragraphs.push((phase, paragraph));
        }

        fn new_table(&mut self, _phase: Phase, table: TableUnit) {
            self.tables.push(table);
        }

        fn finalize(self) -> Result<Self::Output, Self::Error> {
            Ok(self.paragraphs)
        }
    }

    /// In-memory reference source counting lookups.
    #[derive(Default)]
    struct MapReferences {
        entries: HashMap<String, SourceNode>,
        lookups: Vec<String>,
    }

    impl ExternalReferences for MapReferences {
        fn resolve_external(&mut self, anchor: &str) -> Option<SourceNode> {
            self.lookups.push(anchor.to_owned());
            self.entries.get(anchor).cloned()
        }
    }

    fn walk_middle(xml: &str) -> (RecordingWriter, WalkReport) {
        let root = parse_document(xml).unwrap();
        let mut writer = RecordingWriter::default();
        let report = Walker::new(&mut writer).walk_in(&root, Phase::Middle);
        (writer, report)
    }

    #[test]
    fn test_section_with_text_and_list() {
        let (writer, report) = walk_middle(
            r#"<section title="Introduction">
                 <t>This   is   a test.</t>
                 <ul><li>a</li><li>b</li></ul>
               </section>"#,
        );

        let unordered = Some(Numbering::top(ListKind::Unordered));
        let got: Vec<(&str, ParagraphStyle, Option<Numbering>)> = writer
            .paragraphs
            .iter()
            .map(|(_, p)| (p.text.as_str(), p.style, p.numbering))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Introduction", ParagraphStyle::Heading(1), None),
                ("This is a test.", ParagraphStyle::Normal, None),
                ("a", ParagraphStyle::ListParagraph, unordered),
                ("b", ParagraphStyle::ListParagraph, unordered),
            ]
        );
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_author_with_organization() {
        let root = parse_document(
            r#"<rfc><front><author fullname="Jane Doe"><organization>ExampleCorp</organization></author></front></rfc>"#,
        )
        .unwrap();
        let mut writer = RecordingWriter::default();
        Walker::new(&mut writer).walk(&root);

        let (phase, paragraph) = &writer.paragraphs[0];
        assert_eq!(*phase, Phase::Front);
        assert_eq!(paragraph.text, "Jane Doe, ExampleCorp");
        assert_eq!(paragraph.justification, Some(Justification::Right));
        assert_eq!(
            writer.metadata.values(MetaSlug::Authors),
            &["Jane Doe, ExampleCorp".to_owned()]
        );
    }

    #[test]
    fn test_cross_references() {
        let (writer, report) =
            walk_middle(r#"<t>See <xref>foo</xref> and <xref target="RFC1234"/>.</t>"#);
        assert_eq!(writer.texts(), vec!["See foo and [RFC1234]."]);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_relref_resolves_like_xref() {
        let (writer, report) = walk_middle(
            r#"<t>Use <xref target="A"/>, <relref target="RFC8174" section="2">this</relref> and more.</t>"#,
        );
        assert_eq!(writer.texts(), vec!["Use [A], [RFC8174] and more."]);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_cross_reference_is_diagnosed() {
        let (writer, report) = walk_middle("<t>x <xref/>.</t>");
        assert_eq!(writer.texts(), vec!["x ."]);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("xref"));
    }

    #[test]
    fn test_heading_depth_follows_nesting() {
        let (writer, _) = walk_middle(
            r#"<middle>
                 <section title="A">
                   <section title="A1"><section title="A1a"/></section>
                   <section title="A2"/>
                 </section>
                 <section title="B"/>
               </middle>"#,
        );
        assert_eq!(
            writer.styles(),
            vec![
                ParagraphStyle::Heading(1),
                ParagraphStyle::Heading(2),
                ParagraphStyle::Heading(3),
                ParagraphStyle::Heading(2),
                ParagraphStyle::Heading(1),
            ]
        );
    }

    #[test]
    fn test_numbered_headings() {
        let root = parse_document(
            r#"<middle>
                 <section><name>One</name><section title="Sub"/></section>
                 <section title="Two" numbered="false"/>
                 <section title="Three"/>
               </middle>"#,
        )
        .unwrap();
        let mut writer = RecordingWriter::default();
        Walker::new(&mut writer)
            .with_numbered_headings(true)
            .walk_in(&root, Phase::Middle);
        assert_eq!(writer.texts(), vec!["1. One", "1.1. Sub", "Two", "3. Three"]);
    }

    #[test]
    fn test_untitled_section_is_diagnosed_and_walked() {
        let (writer, report) = walk_middle("<section><t>body</t></section>");
        assert_eq!(writer.texts(), vec!["body"]);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_block_children_flush_pending_text() {
        let (writer, _) = walk_middle(
            r#"<t>Before <em>this</em><list style="numbers"><t>one</t></list>after<vspace/>end</t>"#,
        );
        let ordered = Some(Numbering::top(ListKind::Ordered));
        let got: Vec<(&str, Option<Numbering>)> = writer
            .paragraphs
            .iter()
            .map(|(_, p)| (p.text.as_str(), p.numbering))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Before this", None),
                ("one", ordered),
                ("after", None),
                ("end", None),
            ]
        );
        assert_eq!(writer.texts().join(" "), "Before this one after end");
    }

    #[test]
    fn test_list_item_paragraphs_share_numbering() {
        let (writer, _) = walk_middle("<ol><li><t>first</t><t>second</t></li></ol>");
        let ordered = Some(Numbering::top(ListKind::Ordered));
        assert!(writer.paragraphs.iter().all(|(_, p)| p.numbering == ordered));
        assert_eq!(writer.texts(), vec!["first", "second"]);
    }

    #[test]
    fn test_hanging_list() {
        let (writer, _) =
            walk_middle(r#"<list style="hanging"><t hangText="Term:">Meaning.</t></list>"#);
        assert_eq!(writer.texts(), vec!["Term:", "Meaning."]);
        assert_eq!(
            writer.styles(),
            vec![ParagraphStyle::DefinitionTerm, ParagraphStyle::ListParagraph]
        );
        assert!(writer.paragraphs.iter().all(|(_, p)| p.numbering.is_none()));
    }

    #[test]
    fn test_definition_list_follows_source_order() {
        let (writer, _) = walk_middle("<dl><dt>A</dt><dd>alpha</dd><dd>extra</dd><dt>B</dt></dl>");
        assert_eq!(writer.texts(), vec!["A", "alpha", "extra", "B"]);
        assert_eq!(
            writer.styles(),
            vec![
                ParagraphStyle::DefinitionTerm,
                ParagraphStyle::ListParagraph,
                ParagraphStyle::ListParagraph,
                ParagraphStyle::DefinitionTerm,
            ]
        );
    }

    #[test]
    fn test_figure_lines_are_verbatim() {
        let (writer, report) = walk_middle(
            "<figure title=\"Box\"><preamble>Look:</preamble>\
             <artwork><![CDATA[\n  +---+\n\n  | x |  \n]]></artwork>\
             <postamble>Done.</postamble></figure>",
        );
        assert_eq!(
            writer.texts(),
            vec!["Look:", "  +---+", "", "  | x |  ", "Box", "Done."]
        );
        let (_, first_line) = &writer.paragraphs[1];
        assert_eq!(first_line.style, ParagraphStyle::Code);
        assert!(first_line.verbatim);
        let (_, caption) = &writer.paragraphs[4];
        assert_eq!(caption.style, ParagraphStyle::Caption);
        assert_eq!(caption.justification, Some(Justification::Center));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_normal_paragraph_collapses_same_input() {
        let (writer, _) = walk_middle("<t>  +---+\n\n  | x |  </t>");
        assert_eq!(writer.texts(), vec!["+---+ | x |"]);
    }

    #[test]
    fn test_non_ascii_artwork_is_skipped() {
        let (writer, report) = walk_middle(
            r#"<figure><artwork type="svg">ignored</artwork><artwork type="ascii-art">kept</artwork></figure>"#,
        );
        assert_eq!(writer.texts(), vec!["kept"]);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("svg"));
    }

    #[test]
    fn test_sourcecode_is_verbatim() {
        let (writer, _) = walk_middle("<sourcecode>fn main() {\n    run();\n}</sourcecode>");
        assert_eq!(writer.texts(), vec!["fn main() {", "    run();", "}"]);
    }

    #[test]
    fn test_table_rows_and_caption() {
        let (writer, _) = walk_middle(
            r#"<table><name>Codes</name>
                 <thead><tr><th>Code</th><th>Meaning</th></tr></thead>
                 <tbody><tr><td>1</td><td>See <xref target="RFC1"/></td></tr></tbody>
               </table>"#,
        );
        let table = &writer.tables[0];
        assert_eq!(table.caption.as_deref(), Some("Codes"));
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].header);
        assert_eq!(table.rows[0].cells, vec!["Code", "Meaning"]);
        assert!(!table.rows[1].header);
        assert_eq!(table.rows[1].cells, vec!["1", "See [RFC1]"]);
    }

    #[test]
    fn test_texttable_chunks_cells_by_column() {
        let (writer, _) = walk_middle(
            r#"<texttable title="T"><ttcol>A</ttcol><ttcol>B</ttcol>
                 <c>1</c><c>2</c><c>3</c></texttable>"#,
        );
        let rows: Vec<(bool, Vec<String>)> = writer.tables[0]
            .rows
            .iter()
            .map(|r| (r.header, r.cells.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (true, vec!["A".to_owned(), "B".to_owned()]),
                (false, vec!["1".to_owned(), "2".to_owned()]),
                (false, vec!["3".to_owned(), String::new()]),
            ]
        );
    }

    #[test]
    fn test_blockquote_uses_quote_style() {
        let (writer, _) = walk_middle("<blockquote><t>quoted</t></blockquote>");
        assert_eq!(writer.styles(), vec![ParagraphStyle::Quote]);
    }

    #[test]
    fn test_unknown_element_is_skipped() {
        let (writer, report) = walk_middle("<section title=\"S\"><marquee>x</marquee><t>kept</t></section>");
        assert_eq!(writer.texts(), vec!["S", "kept"]);
        assert_eq!(report.diagnostics, vec!["<marquee>: unsupported element skipped".to_owned()]);
    }

    #[test]
    fn test_front_matter_and_rfc_attributes() {
        let root = parse_document(
            r#"<rfc category="std" docName="draft-x-00" ipr="trust200902" updates="1234">
                 <front>
                   <title abbrev="X">An   Example</title>
                   <date day="2" month="March" year="2024"/>
                   <area>Internet</area>
                   <workgroup>Example WG</workgroup>
                   <keyword>one</keyword><keyword>two</keyword>
                   <abstract><t>Short.</t><t>Second.</t></abstract>
                   <boilerplate><t>legal</t></boilerplate>
                 </front>
               </rfc>"#,
        )
        .unwrap();
        let mut writer = RecordingWriter::default();
        let report = Walker::new(&mut writer).walk(&root);

        let meta = &writer.metadata;
        assert_eq!(meta.get(MetaSlug::Category), Some("std"));
        assert_eq!(meta.get(MetaSlug::DocName), Some("draft-x-00"));
        assert_eq!(meta.get(MetaSlug::Ipr), Some("trust200902"));
        assert_eq!(meta.get(MetaSlug::Updates), Some("1234"));
        assert_eq!(meta.get(MetaSlug::Title), Some("An Example"));
        assert_eq!(meta.get(MetaSlug::Date), Some("2 March 2024"));
        assert_eq!(meta.get(MetaSlug::Area), Some("Internet"));
        assert_eq!(meta.get(MetaSlug::Workgroup), Some("Example WG"));
        assert_eq!(meta.values(MetaSlug::Keywords), &["one".to_owned(), "two".to_owned()]);
        assert_eq!(meta.abstract_paragraphs(), &["Short.".to_owned(), "Second.".to_owned()]);

        assert_eq!(writer.texts(), vec!["An Example", "2 March 2024", "Short.", "Second."]);
        assert_eq!(writer.paragraphs[0].1.style, ParagraphStyle::Title);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_references_are_formatted_and_classified() {
        let root = parse_document(
            r#"<rfc><back>
                 <references title="Normative References">
                   <reference anchor="RFC2119">
                     <front><title>Key words</title><author initials="S." surname="Bradner"/><date year="1997"/></front>
                     <seriesInfo name="BCP" value="14"/>
                   </reference>
                 </references>
                 <references><name>Informative References</name>
                   <reference><front><title>No anchor</title></front></reference>
                 </references>
               </back></rfc>"#,
        )
        .unwrap();
        let mut writer = RecordingWriter::default();
        let report = Walker::new(&mut writer).walk(&root);

        assert_eq!(
            writer.texts(),
            vec![
                "Normative References",
                "[RFC2119]  S. Bradner, \"Key words\", BCP 14, 1997.",
                "Informative References",
            ]
        );
        assert!(writer.paragraphs.iter().all(|(phase, _)| *phase == Phase::Back));
        assert_eq!(writer.metadata.values(MetaSlug::Normative), &["RFC2119".to_owned()]);
        assert!(writer.metadata.values(MetaSlug::Informative).is_empty());
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_includes_resolve_once() {
        let root = parse_document(
            r#"<references title="Informative References">
                 <xi:include href="https://bib.ietf.org/public/rfc/bibxml/reference.RFC.7942.xml"/>
                 <xi:include href="https://bib.ietf.org/public/rfc/bibxml/reference.RFC.7942.xml"/>
                 <xi:include href="https://bib.ietf.org/public/rfc/bibxml3/reference.I-D.gone.xml"/>
               </references>"#,
        )
        .unwrap();
        let mut references = MapReferences::default();
        references.entries.insert(
            "RFC.7942".to_owned(),
            SourceNode::new("reference")
                .with_attr("anchor", "RFC7942")
                .with_attr("target", "https://www.rfc-editor.org/info/rfc7942"),
        );
        let mut writer = RecordingWriter::default();
        let report = Walker::new(&mut writer)
            .with_references(&mut references)
            .walk_in(&root, Phase::Back);

        assert_eq!(references.lookups, vec!["RFC.7942", "I-D.gone"]);
        assert_eq!(
            writer.texts(),
            vec![
                "Informative References",
                "[RFC7942]  https://www.rfc-editor.org/info/rfc7942.",
            ]
        );
        assert_eq!(writer.metadata.values(MetaSlug::Informative), &["RFC7942".to_owned()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("I-D.gone"));
    }

    #[test]
    fn test_includes_without_resolver_are_reported() {
        let (writer, report) = walk_middle(
            r#"<references title="Normative References"><xi:include href="reference.RFC.2119.xml"/></references>"#,
        );
        assert_eq!(writer.texts(), vec!["Normative References"]);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_walk_non_rfc_root_is_middle() {
        let root = parse_document("<section title=\"S\"><t>x</t></section>").unwrap();
        let mut writer = RecordingWriter::default();
        Walker::new(&mut writer).walk(&root);
        assert!(writer.paragraphs.iter().all(|(phase, _)| *phase == Phase::Middle));
        let paragraphs = writer.finalize().unwrap();
        assert_eq!(paragraphs.len(), 2);
    }
}
