//! Lists, definition lists, figures, tables and quotes.

use super::{Scope, Walker, section_title};
use crate::tree::{SourceNode, Tag};
use crate::util::collapse_whitespace;
use crate::writer::{
    DocumentWriter, FigureUnit, Justification, ListKind, Numbering, ParagraphStyle,
    ParagraphUnit, TableRow, TableUnit,
};

impl<W: DocumentWriter> Walker<'_, W> {
    /// Each item becomes its own numbered `ListParagraph` run.
    pub(super) fn list(&mut self, node: &SourceNode, scope: &Scope) {
        let numbering = Numbering::top(list_kind(node));
        let item_scope = scope.styled(ParagraphStyle::ListParagraph, Some(numbering));
        for child in &node.children {
            match child.tag {
                Tag::Li => self.text_run(child, &item_scope),
                Tag::T => self.hanging_item(child, &item_scope),
                _ => self.unsupported(child),
            }
        }
    }

    /// v2 list item; a `hangText` is emitted as a term before the body.
    fn hanging_item(&mut self, node: &SourceNode, item_scope: &Scope) {
        let Some(term) = node.non_empty_attr("hangText") else {
            self.text_run(node, item_scope);
            return;
        };
        self.writer.new_paragraph(
            item_scope.phase,
            ParagraphUnit::new(term).style(ParagraphStyle::DefinitionTerm),
        );
        self.text_run(node, &item_scope.styled(ParagraphStyle::ListParagraph, None));
    }

    /// Terms and definitions are walked in source order without pairing checks.
    pub(super) fn definition_list(&mut self, node: &SourceNode, scope: &Scope) {
        let term_scope = scope.styled(ParagraphStyle::DefinitionTerm, None);
        let definition_scope = scope.styled(ParagraphStyle::ListParagraph, None);
        for child in &node.children {
            match child.tag {
                Tag::Dt => self.text_run(child, &term_scope),
                Tag::Dd => self.text_run(child, &definition_scope),
                _ => self.unsupported(child),
            }
        }
    }

    /// Preamble, verbatim artwork lines, caption, postamble.
    pub(super) fn figure(&mut self, node: &SourceNode, scope: &Scope) {
        let body = scope.styled(ParagraphStyle::Normal, None);
        for preamble in node.children_with(&Tag::Preamble) {
            self.text_run(preamble, &body);
        }

        let mut lines = Vec::new();
        for child in &node.children {
            match child.tag {
                Tag::Artwork | Tag::SourceCode => {
                    if let Some(artwork) = self.artwork_lines(child) {
                        lines.extend(artwork);
                    }
                }
                Tag::Preamble | Tag::Postamble | Tag::Name => {}
                _ => self.unsupported(child),
            }
        }
        self.emit_figure(scope, lines, section_title(node));

        for postamble in node.children_with(&Tag::Postamble) {
            self.text_run(postamble, &body);
        }
    }

    /// `artwork` or `sourcecode` directly inside a section.
    pub(super) fn bare_artwork(&mut self, node: &SourceNode, scope: &Scope) {
        if let Some(lines) = self.artwork_lines(node) {
            self.emit_figure(scope, lines, None);
        }
    }

    fn emit_figure(&mut self, scope: &Scope, lines: Vec<String>, caption: Option<String>) {
        if lines.is_empty() {
            if let Some(caption) = caption {
                self.writer.new_paragraph(
                    scope.phase,
                    ParagraphUnit::new(caption)
                        .style(ParagraphStyle::Caption)
                        .justify(Justification::Center),
                );
            }
            return;
        }
        self.writer
            .new_figure(scope.phase, FigureUnit { lines, caption });
    }

    /// Lines of ASCII artwork or source code. Other artwork types are skipped.
    fn artwork_lines(&mut self, node: &SourceNode) -> Option<Vec<String>> {
        if node.tag == Tag::Artwork
            && let Some(kind) = node.non_empty_attr("type")
            && !kind.trim().eq_ignore_ascii_case("ascii-art")
        {
            self.diagnose(node, &format!("artwork of type {} skipped", kind.trim()));
            return None;
        }
        let text = node.text_content();
        if text.trim().is_empty() {
            self.diagnose(node, "artwork has no inline content");
            return None;
        }
        Some(verbatim_lines(&text))
    }

    pub(super) fn table(&mut self, node: &SourceNode, scope: &Scope) {
        if node.tag == Tag::TextTable {
            self.text_table(node, scope);
            return;
        }

        let mut rows = Vec::new();
        for child in &node.children {
            match child.tag {
                Tag::THead | Tag::TBody | Tag::TFoot => {
                    let header = child.tag == Tag::THead;
                    for tr in child.children_with(&Tag::Tr) {
                        let row = self.table_row(tr, header);
                        rows.push(row);
                    }
                }
                Tag::Tr => {
                    let header =
                        !child.children.is_empty() && child.children.iter().all(|c| c.tag == Tag::Th);
                    let row = self.table_row(child, header);
                    rows.push(row);
                }
                Tag::Name => {}
                _ => self.unsupported(child),
            }
        }
        self.emit_table(node, scope, rows, section_title(node));
    }

    /// v2 table: `ttcol` headers, `c` cells chunked by the column count.
    fn text_table(&mut self, node: &SourceNode, scope: &Scope) {
        let body = scope.styled(ParagraphStyle::Normal, None);
        for preamble in node.children_with(&Tag::Preamble) {
            self.text_run(preamble, &body);
        }

        let header: Vec<String> = node
            .children_with(&Tag::TtCol)
            .map(|col| self.cell_text(col))
            .collect();
        if header.is_empty() {
            self.diagnose(node, "texttable has no columns");
        } else {
            let cells: Vec<String> = node
                .children_with(&Tag::C)
                .map(|cell| self.cell_text(cell))
                .collect();
            let columns = header.len();
            let mut rows = vec![TableRow {
                header: true,
                cells: header,
            }];
            for chunk in cells.chunks(columns) {
                let mut cells = chunk.to_vec();
                cells.resize(columns, String::new());
                rows.push(TableRow {
                    header: false,
                    cells,
                });
            }
            self.emit_table(node, scope, rows, section_title(node));
        }

        for postamble in node.children_with(&Tag::Postamble) {
            self.text_run(postamble, &body);
        }
    }

    fn table_row(&mut self, tr: &SourceNode, header: bool) -> TableRow {
        let cells = tr
            .children
            .iter()
            .filter(|cell| matches!(cell.tag, Tag::Th | Tag::Td))
            .map(|cell| self.cell_text(cell))
            .collect();
        TableRow { header, cells }
    }

    fn cell_text(&mut self, cell: &SourceNode) -> String {
        collapse_whitespace(&self.inline_content(cell))
    }

    fn emit_table(
        &mut self,
        node: &SourceNode,
        scope: &Scope,
        rows: Vec<TableRow>,
        caption: Option<String>,
    ) {
        if rows.is_empty() {
            self.diagnose(node, "table has no rows");
            return;
        }
        self.writer
            .new_table(scope.phase, TableUnit { rows, caption });
    }

    /// `blockquote` and `aside`: every run inside uses the `Quote` style.
    pub(super) fn quote(&mut self, node: &SourceNode, scope: &Scope) {
        self.text_run(node, &scope.styled(ParagraphStyle::Quote, None));
    }
}

fn list_kind(node: &SourceNode) -> ListKind {
    match node.tag {
        Tag::Ol => ListKind::Ordered,
        Tag::Ul => ListKind::Unordered,
        _ => {
            let style = node.attr("style").unwrap_or_default().trim();
            if matches!(style, "numbers" | "letters") || style.starts_with("format") {
                ListKind::Ordered
            } else {
                ListKind::Unordered
            }
        }
    }
}

/// Split artwork text into lines, dropping the blank line that follows the
/// opening delimiter and the one that precedes the closing delimiter.
fn verbatim_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.into_iter().map(str::to_owned).collect()
}
