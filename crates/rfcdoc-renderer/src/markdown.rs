//! kramdown-rfc style Markdown backend.
//!
//! Output layout: YAML front matter, optional `--- abstract`, one
//! `--- note_<title>` section per front note, then `--- middle` and
//! `--- back` with their blocks separated by blank lines.
//! Paragraphs are wrapped at finalize; fenced figures and tables are kept
//! as written.

use std::fmt::Write;

use crate::error::MarkdownError;
use crate::metadata::{MetaSlug, Metadata};
use crate::util::{wrap_text, wrap_with_prefix};
use crate::writer::{
    DocumentWriter, FigureUnit, InlineKind, Justification, ListKind, Paragraph, ParagraphStyle,
    Phase, TableUnit,
};

/// Default wrap column.
pub const DEFAULT_WRAP_WIDTH: usize = 80;

const FENCE: &str = "~~~~";

/// Title for front content outside any titled note.
const UNTITLED_NOTE: &str = "Note";

/// One body block awaiting serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Block {
    /// Wrapped at finalize. `hanging` indents continuation lines.
    Text {
        prefix: String,
        hanging: String,
        text: String,
    },
    /// Emitted as-is.
    Verbatim(String),
    /// Starts a front note section.
    Note(String),
}

impl Block {
    fn plain(text: impl Into<String>) -> Self {
        Self::Text {
            prefix: String::new(),
            hanging: String::new(),
            text: text.into(),
        }
    }

    fn render(&self, width: usize) -> String {
        match self {
            Self::Text {
                prefix,
                hanging,
                text,
            } => wrap_with_prefix(prefix, text, width, hanging),
            Self::Verbatim(text) => text.clone(),
            Self::Note(title) => format!("--- note_{}", title.replace(' ', "_")),
        }
    }
}

/// Markdown [`DocumentWriter`].
#[derive(Debug)]
pub struct MarkdownWriter {
    metadata: Metadata,
    wrap_width: usize,
    notes: Vec<Block>,
    middle: Vec<Block>,
    back: Vec<Block>,
}

impl Default for MarkdownWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: Metadata::new(),
            wrap_width: DEFAULT_WRAP_WIDTH,
            notes: Vec::new(),
            middle: Vec::new(),
            back: Vec::new(),
        }
    }

    /// Wrap paragraphs at `width` columns.
    #[must_use]
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Front content lands in note sections; untitled content opens one.
    fn push(&mut self, phase: Phase, block: Block) {
        let blocks = match phase {
            Phase::Front => {
                if self.notes.is_empty() && !matches!(block, Block::Note(_)) {
                    self.notes.push(Block::Note(UNTITLED_NOTE.to_owned()));
                }
                &mut self.notes
            }
            Phase::Middle => &mut self.middle,
            Phase::Back => &mut self.back,
        };
        blocks.push(block);
    }

    fn write_front(&self, out: &mut String) {
        out.push_str("---\ncoding: utf-8\nstand_alone: yes\npi: [toc, sortrefs, symrefs, comments]\n");
        for (slug, values) in self.metadata.iter() {
            match slug {
                MetaSlug::Authors => {
                    out.push_str("author:\n");
                    for author in values {
                        let _ = writeln!(out, "- name: {}", yaml_scalar(author));
                    }
                }
                MetaSlug::Normative | MetaSlug::Informative => {}
                _ => {
                    let _ = writeln!(out, "{}: {}", slug.key(), yaml_scalar(&values.join(", ")));
                }
            }
        }
        for slug in [MetaSlug::Normative, MetaSlug::Informative] {
            let anchors = self.metadata.values(slug);
            if anchors.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{}:", slug.key());
            for anchor in anchors {
                let _ = writeln!(out, "  {anchor}:");
            }
        }
    }

    fn write_blocks(&self, out: &mut String, blocks: &[Block]) {
        for block in blocks {
            out.push_str(&block.render(self.wrap_width));
            out.push_str("\n\n");
        }
    }
}

impl DocumentWriter for MarkdownWriter {
    type Output = String;
    type Error = MarkdownError;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn emit_paragraph(&mut self, phase: Phase, paragraph: Paragraph) {
        // Author and date echo lines; the front matter already carries them.
        if phase == Phase::Front && paragraph.justification == Some(Justification::Right) {
            return;
        }
        let block = match paragraph.style {
            ParagraphStyle::Title => {
                self.metadata.record(MetaSlug::Title, &paragraph.text);
                return;
            }
            // Captured into the metadata store by `new_paragraph`.
            ParagraphStyle::Abstract => return,
            ParagraphStyle::Heading(_) if phase == Phase::Front => Block::Note(paragraph.text),
            ParagraphStyle::Heading(level @ 1..=6) => {
                Block::plain(format!("{} {}", "#".repeat(usize::from(level)), paragraph.text))
            }
            ParagraphStyle::ListParagraph => {
                let (prefix, hanging) = match paragraph.numbering.map(|n| n.kind) {
                    Some(ListKind::Unordered) => ("- ", "  "),
                    Some(ListKind::Ordered) => ("1. ", "   "),
                    None => (": ", "  "),
                };
                Block::Text {
                    prefix: prefix.to_owned(),
                    hanging: hanging.to_owned(),
                    text: paragraph.text,
                }
            }
            ParagraphStyle::Quote => Block::Text {
                prefix: "> ".to_owned(),
                hanging: "> ".to_owned(),
                text: paragraph.text,
            },
            ParagraphStyle::Code => Block::Verbatim(paragraph.text),
            _ => Block::plain(paragraph.text),
        };
        self.push(phase, block);
    }

    fn new_table(&mut self, phase: Phase, table: TableUnit) {
        let mut text = String::new();
        for row in &table.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| c.replace('|', "\\|")).collect();
            let _ = writeln!(text, "| {} |", cells.join(" | "));
            if row.header {
                let separator = vec!["---"; row.cells.len().max(1)];
                let _ = writeln!(text, "| {} |", separator.join(" | "));
            }
        }
        let text = text.trim_end().to_owned();
        self.push(phase, Block::Verbatim(text));
        if let Some(caption) = table.caption {
            self.push(phase, Block::plain(caption));
        }
    }

    fn new_figure(&mut self, phase: Phase, figure: FigureUnit) {
        let mut text = String::from(FENCE);
        for line in &figure.lines {
            text.push('\n');
            text.push_str(line);
        }
        text.push('\n');
        text.push_str(FENCE);
        if let Some(caption) = figure.caption {
            let _ = write!(text, "\n{{: title=\"{}\"}}", caption.replace('"', "\\\""));
        }
        self.push(phase, Block::Verbatim(text));
    }

    fn inline(&self, kind: InlineKind, text: &str) -> String {
        match kind {
            InlineKind::Bcp14 | InlineKind::Strong => format!("**{text}**"),
            InlineKind::Tt => format!("`{text}`"),
            InlineKind::Em => format!("*{text}*"),
            InlineKind::Sub => format!("<sub>{text}</sub>"),
            InlineKind::Sup => format!("<sup>{text}</sup>"),
        }
    }

    fn finalize(self) -> Result<String, MarkdownError> {
        let mut out = String::with_capacity(4096);
        self.write_front(&mut out);

        let abstract_paragraphs = self.metadata.abstract_paragraphs();
        if !abstract_paragraphs.is_empty() {
            out.push_str("\n--- abstract\n\n");
            for paragraph in abstract_paragraphs {
                out.push_str(&wrap_text(paragraph, self.wrap_width));
                out.push_str("\n\n");
            }
        }

        if !self.notes.is_empty() {
            out.push('\n');
            self.write_blocks(&mut out, &self.notes);
        }

        out.push_str("\n--- middle\n\n");
        self.write_blocks(&mut out, &self.middle);
        out.push_str("\n--- back\n\n");
        self.write_blocks(&mut out, &self.back);
        Ok(out)
    }
}

/// Quote a YAML scalar when it would otherwise be misread.
fn yaml_scalar(value: &str) -> String {
    let needs_quotes = value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || value.starts_with(|c: char| "-?:[]{}#&*!|>'\"%@`".contains(c));
    if needs_quotes {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use crate::walker::Walker;
    use crate::writer::{Numbering, ParagraphUnit, TableRow};
    use pretty_assertions::assert_eq;

    fn render(xml: &str) -> String {
        let root = parse_document(xml).unwrap();
        let mut writer = MarkdownWriter::new();
        Walker::new(&mut writer).walk(&root);
        writer.finalize().unwrap()
    }

    #[test]
    fn test_full_document() {
        let output = render(
            r#"<rfc category="info" docName="draft-doe-example-00">
                 <front>
                   <title>Example</title>
                   <author fullname="Jane Doe"><organization>ExampleCorp</organization></author>
                   <date month="May" year="2024"/>
                   <abstract><t>This is short.</t></abstract>
                 </front>
                 <middle>
                   <section title="Introduction">
                     <t>Implementations <bcp14>MUST</bcp14> use <tt>x</tt>.</t>
                     <ul><li>a</li><li>b</li></ul>
                   </section>
                 </middle>
                 <back>
                   <references title="Normative References">
                     <reference anchor="RFC2119"><front><title>Key words</title></front></reference>
                   </references>
                 </back>
               </rfc>"#,
        );
        let expected = r#"---
coding: utf-8
stand_alone: yes
pi: [toc, sortrefs, symrefs, comments]
title: Example
docname: draft-doe-example-00
category: info
date: May 2024
author:
- name: Jane Doe, ExampleCorp

normative:
  RFC2119:

--- abstract

This is short.


--- middle

# Introduction

Implementations **MUST** use `x`.

- a

- b


--- back

# Normative References

[RFC2119]  "Key words".

"#;
        assert_eq!(output, expected);
    }

    #[test]
    fn test_heading_levels() {
        let mut writer = MarkdownWriter::new();
        writer.new_paragraph(Phase::Middle, ParagraphUnit::new("Deep").style(ParagraphStyle::Heading(3)));
        writer.new_paragraph(Phase::Middle, ParagraphUnit::new("Deeper").style(ParagraphStyle::Heading(7)));
        assert_eq!(writer.middle, vec![Block::plain("### Deep"), Block::plain("Deeper")]);
    }

    #[test]
    fn test_front_echo_lines_are_not_repeated() {
        let mut writer = MarkdownWriter::new();
        writer.new_paragraph(
            Phase::Front,
            ParagraphUnit::new("Jane Doe").justify(Justification::Right),
        );
        writer.new_paragraph(Phase::Middle, ParagraphUnit::new("Body"));
        assert!(writer.notes.is_empty());
        assert_eq!(writer.middle, vec![Block::plain("Body")]);
        assert!(writer.back.is_empty());
    }

    #[test]
    fn test_front_notes_become_note_sections() {
        let output = render(
            r#"<rfc>
                 <front>
                   <title>X</title>
                   <author fullname="Jane Doe"/>
                   <note title="Discussion Venues"><t>Discuss on the list foo@example.org.</t></note>
                 </front>
                 <middle><section title="One"><t>Body.</t></section></middle>
               </rfc>"#,
        );
        assert!(output.contains(
            "\n--- note_Discussion_Venues\n\nDiscuss on the list foo@example.org.\n\n\n--- middle\n"
        ));
        assert_eq!(output.matches("Jane Doe").count(), 1);
    }

    #[test]
    fn test_untitled_front_content_opens_a_note() {
        let mut writer = MarkdownWriter::new();
        writer.new_paragraph(Phase::Front, ParagraphUnit::new("Stray text"));
        assert_eq!(
            writer.notes,
            vec![Block::Note("Note".to_owned()), Block::plain("Stray text")]
        );
    }

    #[test]
    fn test_wrapping_keeps_list_indent() {
        let mut writer = MarkdownWriter::new().with_wrap_width(20);
        writer.new_paragraph(
            Phase::Middle,
            ParagraphUnit::new("one two three four five six")
                .style(ParagraphStyle::ListParagraph)
                .numbered(Some(Numbering::top(ListKind::Unordered))),
        );
        let output = writer.finalize().unwrap();
        assert!(output.contains("- one two three four\n  five six\n"));
    }

    #[test]
    fn test_figure_is_fenced_and_not_wrapped() {
        let mut writer = MarkdownWriter::new().with_wrap_width(20);
        writer.new_figure(
            Phase::Middle,
            FigureUnit {
                lines: vec!["  +----------------------------+".to_owned(), String::new()],
                caption: Some("A \"box\"".to_owned()),
            },
        );
        let output = writer.finalize().unwrap();
        assert!(output.contains(
            "~~~~\n  +----------------------------+\n\n~~~~\n{: title=\"A \\\"box\\\"\"}\n"
        ));
    }

    #[test]
    fn test_table_rows() {
        let mut writer = MarkdownWriter::new();
        writer.new_table(
            Phase::Back,
            TableUnit {
                rows: vec![
                    TableRow {
                        header: true,
                        cells: vec!["Code".to_owned(), "Meaning".to_owned()],
                    },
                    TableRow {
                        header: false,
                        cells: vec!["1".to_owned(), "a|b".to_owned()],
                    },
                ],
                caption: Some("Codes".to_owned()),
            },
        );
        assert_eq!(
            writer.back,
            vec![
                Block::Verbatim("| Code | Meaning |\n| --- | --- |\n| 1 | a\\|b |".to_owned()),
                Block::plain("Codes"),
            ]
        );
    }

    #[test]
    fn test_quote_and_definitions() {
        let mut writer = MarkdownWriter::new();
        writer.new_paragraph(Phase::Middle, ParagraphUnit::new("quoted").style(ParagraphStyle::Quote));
        writer.new_paragraph(Phase::Middle, ParagraphUnit::new("Term").style(ParagraphStyle::DefinitionTerm));
        writer.new_paragraph(Phase::Middle, ParagraphUnit::new("meaning").style(ParagraphStyle::ListParagraph));
        let output = writer.finalize().unwrap();
        assert!(output.contains("> quoted\n\nTerm\n\n: meaning\n\n"));
    }

    #[test]
    fn test_yaml_scalar() {
        assert_eq!(yaml_scalar("plain value"), "plain value");
        assert_eq!(yaml_scalar("a: b"), "\"a: b\"");
        assert_eq!(yaml_scalar("-leading"), "\"-leading\"");
    }

    #[test]
    fn test_empty_document() {
        let output = MarkdownWriter::new().finalize().unwrap();
        assert_eq!(
            output,
            "---\ncoding: utf-8\nstand_alone: yes\npi: [toc, sortrefs, symrefs, comments]\n\n--- middle\n\n\n--- back\n\n"
        );
    }
}
