//! `word/document.xml` body: immutable blocks and their one-pass serializer.

use std::fmt::Write;

use rfcdoc_renderer::TableRow;

/// Namespace declarations on `w:document`.
const NAMESPACES: [(&str, &str); 31] = [
    ("wpc", "http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas"),
    ("cx", "http://schemas.microsoft.com/office/drawing/2014/chartex"),
    ("cx1", "http://schemas.microsoft.com/office/drawing/2015/9/8/chartex"),
    ("cx2", "http://schemas.microsoft.com/office/drawing/2015/10/21/chartex"),
    ("cx3", "http://schemas.microsoft.com/office/drawing/2016/5/9/chartex"),
    ("cx4", "http://schemas.microsoft.com/office/drawing/2016/5/10/chartex"),
    ("cx5", "http://schemas.microsoft.com/office/drawing/2016/5/11/chartex"),
    ("cx6", "http://schemas.microsoft.com/office/drawing/2016/5/12/chartex"),
    ("cx7", "http://schemas.microsoft.com/office/drawing/2016/5/13/chartex"),
    ("cx8", "http://schemas.microsoft.com/office/drawing/2016/5/14/chartex"),
    ("mc", "http://schemas.openxmlformats.org/markup-compatibility/2006"),
    ("aink", "http://schemas.microsoft.com/office/drawing/2016/ink"),
    ("am3d", "http://schemas.microsoft.com/office/drawing/2017/model3d"),
    ("o", "urn:schemas-microsoft-com:office:office"),
    ("r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships"),
    ("m", "http://schemas.openxmlformats.org/officeDocument/2006/math"),
    ("v", "urn:schemas-microsoft-com:vml"),
    ("wp14", "http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing"),
    ("wp", "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"),
    ("w10", "urn:schemas-microsoft-com:office:word"),
    ("w", "http://schemas.openxmlformats.org/wordprocessingml/2006/main"),
    ("w14", "http://schemas.microsoft.com/office/word/2010/wordml"),
    ("w15", "http://schemas.microsoft.com/office/word/2012/wordml"),
    ("w16cex", "http://schemas.microsoft.com/office/word/2018/wordml/cex"),
    ("w16cid", "http://schemas.microsoft.com/office/word/2016/wordml/cid"),
    ("w16", "http://schemas.microsoft.com/office/word/2018/wordml"),
    ("w16se", "http://schemas.microsoft.com/office/word/2015/wordml/symex"),
    ("wpg", "http://schemas.microsoft.com/office/word/2010/wordprocessingGroup"),
    ("wpi", "http://schemas.microsoft.com/office/word/2010/wordprocessingInk"),
    ("wne", "http://schemas.microsoft.com/office/word/2006/wordml"),
    ("wps", "http://schemas.microsoft.com/office/word/2010/wordprocessingShape"),
];

const IGNORABLE: &str = "w14 w15 w16se w16cid w16 w16cex wp14";

/// US Letter page with one-inch margins.
const SECTION_PROPERTIES: &str = concat!(
    r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
    r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#,
    r#"<w:cols w:space="708"/><w:docGrid w:linePitch="360"/></w:sectPr>"#,
);

/// Single text run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    /// `w:lang`; absent for verbatim text.
    pub language: Option<String>,
    /// Character style repeated on the run (`w:rStyle`).
    pub char_style: Option<String>,
    pub bold: bool,
}

/// Paragraph block (`w:p`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParagraphBlock {
    pub style: String,
    /// `w:jc` value (`left`, `center`, `right`, `both`).
    pub justification: Option<&'static str>,
    /// `(numId, ilvl)`.
    pub numbering: Option<(u32, u8)>,
    pub run: Run,
}

/// Table block (`w:tbl`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableBlock {
    pub rows: Vec<TableRow>,
}

/// One body element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Table(TableBlock),
}

/// Ordered, append-only sequence of body blocks.
#[derive(Clone, Debug, Default)]
pub struct BodyBuilder {
    blocks: Vec<Block>,
}

impl BodyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Render `word/document.xml` from body blocks.
#[must_use]
pub fn serialize_document(blocks: &[Block]) -> String {
    let mut out = String::with_capacity(4096 + blocks.len() * 160);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push_str("\n<w:document");
    for (prefix, uri) in NAMESPACES {
        let _ = write!(out, r#" xmlns:{prefix}="{uri}""#);
    }
    let _ = write!(out, r#" mc:Ignorable="{IGNORABLE}"><w:body>"#);
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => write_paragraph(&mut out, paragraph),
            Block::Table(table) => write_table(&mut out, table),
        }
    }
    out.push_str(SECTION_PROPERTIES);
    out.push_str("</w:body></w:document>");
    out
}

fn write_paragraph(out: &mut String, paragraph: &ParagraphBlock) {
    out.push_str("<w:p><w:pPr>");
    let _ = write!(out, r#"<w:pStyle w:val="{}"/>"#, escape_xml(&paragraph.style));
    if let Some((num_id, level)) = paragraph.numbering {
        let _ = write!(
            out,
            r#"<w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr>"#
        );
    }
    if let Some(jc) = paragraph.justification {
        let _ = write!(out, r#"<w:jc w:val="{jc}"/>"#);
    }
    out.push_str("</w:pPr>");
    write_run(out, &paragraph.run);
    out.push_str("</w:p>");
}

fn write_run(out: &mut String, run: &Run) {
    out.push_str("<w:r>");
    if run.char_style.is_some() || run.bold || run.language.is_some() {
        out.push_str("<w:rPr>");
        if let Some(style) = &run.char_style {
            let _ = write!(out, r#"<w:rStyle w:val="{}"/>"#, escape_xml(style));
        }
        if run.bold {
            out.push_str("<w:b/>");
        }
        if let Some(language) = &run.language {
            let _ = write!(out, r#"<w:lang w:val="{}"/>"#, escape_xml(language));
        }
        out.push_str("</w:rPr>");
    }
    if needs_preserve(run) {
        let _ = write!(out, r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(&run.text));
    } else {
        let _ = write!(out, "<w:t>{}</w:t>", escape_xml(&run.text));
    }
    out.push_str("</w:r>");
}

/// Verbatim runs and runs with edge whitespace keep their spacing.
fn needs_preserve(run: &Run) -> bool {
    run.language.is_none()
        || run.text.starts_with(char::is_whitespace)
        || run.text.ends_with(char::is_whitespace)
}

fn write_table(out: &mut String, table: &TableBlock) {
    let columns = table.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0).max(1);
    out.push_str(concat!(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/>"#,
        "<w:tblBorders>",
        r#"<w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        "</w:tblBorders>",
        r#"<w:tblLook w:val="04A0"/></w:tblPr><w:tblGrid>"#,
    ));
    for _ in 0..columns {
        out.push_str("<w:gridCol/>");
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        out.push_str("<w:tr>");
        if row.header {
            out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        for index in 0..columns {
            let text = row.cells.get(index).map_or("", String::as_str);
            out.push_str(r#"<w:tc><w:tcPr><w:tcW w:w="0" w:type="auto"/></w:tcPr><w:p>"#);
            write_run(
                out,
                &Run {
                    text: text.to_owned(),
                    bold: row.header,
                    ..Run::default()
                },
            );
            out.push_str("</w:p></w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

/// Escape XML special characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
