//! Source document tree for the RFC XML vocabulary.
//!
//! Nodes follow the ElementTree text/tail model: `text` is the character data
//! before the first child, and each child's `tail` is the character data that
//! follows it inside the parent. [`SourceNode::content`] walks both in
//! document order.

use std::collections::HashMap;

/// Element kinds the walker knows how to handle.
///
/// Anything outside the vocabulary is kept as [`Tag::Other`] so the walker can
/// report it by name and skip it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    Rfc,
    Front,
    Middle,
    Back,
    Section,
    Note,
    References,
    Reference,
    ReferenceGroup,
    T,
    List,
    Ol,
    Ul,
    Li,
    Dl,
    Dt,
    Dd,
    Figure,
    Artwork,
    SourceCode,
    Preamble,
    Postamble,
    Table,
    TextTable,
    TtCol,
    C,
    THead,
    TBody,
    TFoot,
    Tr,
    Th,
    Td,
    Xref,
    Relref,
    Eref,
    Bcp14,
    Tt,
    Em,
    Strong,
    Sub,
    Sup,
    Br,
    VSpace,
    Author,
    Organization,
    Address,
    Date,
    Title,
    Name,
    Abstract,
    Keyword,
    Area,
    Workgroup,
    SeriesInfo,
    Boilerplate,
    BlockQuote,
    Aside,
    Include,
    RefContent,
    Annotation,
    Other(String),
}

impl Tag {
    /// Classify an element name. Namespace prefixes are only significant for
    /// `xi:include`; every other prefixed name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "rfc" => Self::Rfc,
            "front" => Self::Front,
            "middle" => Self::Middle,
            "back" => Self::Back,
            "section" => Self::Section,
            "note" => Self::Note,
            "references" => Self::References,
            "reference" => Self::Reference,
            "referencegroup" => Self::ReferenceGroup,
            "t" => Self::T,
            "list" => Self::List,
            "ol" => Self::Ol,
            "ul" => Self::Ul,
            "li" => Self::Li,
            "dl" => Self::Dl,
            "dt" => Self::Dt,
            "dd" => Self::Dd,
            "figure" => Self::Figure,
            "artwork" => Self::Artwork,
            "sourcecode" => Self::SourceCode,
            "preamble" => Self::Preamble,
            "postamble" => Self::Postamble,
            "table" => Self::Table,
            "texttable" => Self::TextTable,
            "ttcol" => Self::TtCol,
            "c" => Self::C,
            "thead" => Self::THead,
            "tbody" => Self::TBody,
            "tfoot" => Self::TFoot,
            "tr" => Self::Tr,
            "th" => Self::Th,
            "td" => Self::Td,
            "xref" => Self::Xref,
            "relref" => Self::Relref,
            "eref" => Self::Eref,
            "bcp14" => Self::Bcp14,
            "tt" => Self::Tt,
            "em" => Self::Em,
            "strong" => Self::Strong,
            "sub" => Self::Sub,
            "sup" => Self::Sup,
            "br" => Self::Br,
            "vspace" => Self::VSpace,
            "author" => Self::Author,
            "organization" => Self::Organization,
            "address" => Self::Address,
            "date" => Self::Date,
            "title" => Self::Title,
            "name" => Self::Name,
            "abstract" => Self::Abstract,
            "keyword" => Self::Keyword,
            "area" => Self::Area,
            "workgroup" => Self::Workgroup,
            "seriesInfo" => Self::SeriesInfo,
            "boilerplate" => Self::Boilerplate,
            "blockquote" => Self::BlockQuote,
            "aside" => Self::Aside,
            "xi:include" | "include" => Self::Include,
            "refcontent" => Self::RefContent,
            "annotation" => Self::Annotation,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Element of the parsed source document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceNode {
    /// Classified element kind.
    pub tag: Tag,
    /// Element name as written in the source (for diagnostics).
    pub name: String,
    /// Character data before the first child.
    pub text: String,
    /// Character data following this element inside its parent.
    pub tail: String,
    /// Element attributes (namespace declarations excluded).
    pub attrs: HashMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<SourceNode>,
}

/// One piece of mixed content, yielded by [`SourceNode::content`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Content<'a> {
    Text(&'a str),
    Element(&'a SourceNode),
}

impl SourceNode {
    /// Create a node for the given element name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            tag: Tag::from_name(&name),
            name,
            text: String::new(),
            tail: String::new(),
            attrs: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Add one attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Append one child.
    #[must_use]
    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SourceNode>) -> Self {
        self.children = children;
        self
    }

    /// Attribute value, if present.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Attribute value if present and not blank.
    #[must_use]
    pub fn non_empty_attr(&self, key: &str) -> Option<&str> {
        self.attr(key).filter(|v| !v.trim().is_empty())
    }

    /// First direct child with the given tag.
    #[must_use]
    pub fn child(&self, tag: &Tag) -> Option<&SourceNode> {
        self.children.iter().find(|c| &c.tag == tag)
    }

    /// All direct children with the given tag.
    pub fn children_with<'a>(&'a self, tag: &Tag) -> impl Iterator<Item = &'a SourceNode> + use<'a> {
        let tag = tag.clone();
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Mixed content in document order: leading text, then each child
    /// followed by its tail. Empty text pieces are skipped.
    pub fn content(&self) -> impl Iterator<Item = Content<'_>> + '_ {
        let lead = (!self.text.is_empty()).then_some(Content::Text(self.text.as_str()));
        lead.into_iter().chain(self.children.iter().flat_map(|child| {
            let tail = (!child.tail.is_empty()).then_some(Content::Text(child.tail.as_str()));
            std::iter::once(Content::Element(child)).chain(tail)
        }))
    }

    /// Concatenated text of this node and all descendants, excluding this
    /// node's own tail.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
            out.push_str(&child.tail);
        }
    }

    /// Depth-first search for the first descendant (or self) with `tag`.
    #[must_use]
    pub fn find(&self, tag: &Tag) -> Option<&SourceNode> {
        if &self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_classification() {
        assert_eq!(Tag::from_name("t"), Tag::T);
        assert_eq!(Tag::from_name("xi:include"), Tag::Include);
        assert_eq!(Tag::from_name("seriesInfo"), Tag::SeriesInfo);
        assert_eq!(Tag::from_name("marquee"), Tag::Other("marquee".to_owned()));
    }

    #[test]
    fn test_content_order() {
        let node = SourceNode::new("t").with_text("See ").with_children(vec![
            SourceNode::new("xref").with_attr("target", "RFC1").with_tail(" and "),
            SourceNode::new("em").with_text("this"),
        ]);

        let pieces: Vec<String> = node
            .content()
            .map(|c| match c {
                Content::Text(t) => format!("text:{t}"),
                Content::Element(e) => format!("elem:{}", e.name),
            })
            .collect();

        assert_eq!(pieces, vec!["text:See ", "elem:xref", "text: and ", "elem:em"]);
    }

    #[test]
    fn test_text_content_includes_tails() {
        let node = SourceNode::new("t").with_text("a ").with_children(vec![
            SourceNode::new("em").with_text("b").with_tail(" c"),
        ]);
        assert_eq!(node.text_content(), "a b c");
    }

    #[test]
    fn test_non_empty_attr() {
        let node = SourceNode::new("section")
            .with_attr("title", "  ")
            .with_attr("anchor", "intro");
        assert_eq!(node.non_empty_attr("title"), None);
        assert_eq!(node.non_empty_attr("anchor"), Some("intro"));
    }

    #[test]
    fn test_find_descendant() {
        let node = SourceNode::new("rfc").with_child(
            SourceNode::new("back").with_child(SourceNode::new("reference").with_attr("anchor", "X")),
        );
        assert_eq!(node.find(&Tag::Reference).and_then(|r| r.attr("anchor")), Some("X"));
        assert!(node.find(&Tag::Figure).is_none());
    }
}
