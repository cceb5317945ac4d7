//! Reference sections, inline entries and external includes.

use super::{Scope, Walker, section_title};
use crate::metadata::MetaSlug;
use crate::reference::{ReferenceEntry, format_reference};
use crate::tree::{SourceNode, Tag};
use crate::writer::{DocumentWriter, ParagraphStyle, ParagraphUnit};

impl<W: DocumentWriter> Walker<'_, W> {
    /// Body of a `references` section. The heading is already emitted.
    pub(super) fn references(&mut self, node: &SourceNode, scope: &Scope) {
        let class = section_title(node).and_then(|title| classify(&title));
        for child in &node.children {
            match child.tag {
                Tag::References => self.section(child, scope, None),
                Tag::Reference | Tag::ReferenceGroup => self.reference(child, scope, class),
                Tag::Include => self.include(child, scope, class),
                Tag::Name => {}
                _ => self.unsupported(child),
            }
        }
    }

    /// Emit one formatted entry and record its anchor under `class`.
    pub(super) fn reference(&mut self, node: &SourceNode, scope: &Scope, class: Option<MetaSlug>) {
        let Some(entry) = ReferenceEntry::from_node(node) else {
            self.diagnose(node, "reference without anchor skipped");
            return;
        };
        let line = ParagraphUnit {
            preserve_whitespace: true,
            ..ParagraphUnit::new(format_reference(&entry))
        };
        self.writer
            .new_paragraph(scope.phase, line.style(ParagraphStyle::Reference));
        if let Some(slug) = class {
            self.writer.set_metadata(scope.phase, slug, &entry.anchor);
        }

        if node.tag == Tag::ReferenceGroup {
            for child in &node.children {
                match child.tag {
                    Tag::Reference => self.reference(child, scope, None),
                    Tag::Include => self.include(child, scope, None),
                    _ => {}
                }
            }
        }
    }

    /// Resolve an `xi:include` through the configured [`ExternalReferences`].
    ///
    /// Each anchor is looked up at most once per walk.
    ///
    /// [`ExternalReferences`]: crate::reference::ExternalReferences
    pub(super) fn include(&mut self, node: &SourceNode, scope: &Scope, class: Option<MetaSlug>) {
        let Some(anchor) = node.attr("href").and_then(anchor_from_href) else {
            self.diagnose(node, "include without usable href");
            return;
        };
        if !self.resolved_anchors.insert(anchor.clone()) {
            tracing::debug!(anchor = %anchor, "External reference already handled");
            return;
        }
        let Some(references) = self.references.as_mut() else {
            self.diagnose(node, &format!("external reference {anchor} not fetched"));
            return;
        };

        match references.resolve_external(&anchor) {
            Some(fetched) if matches!(fetched.tag, Tag::Reference | Tag::ReferenceGroup) => {
                self.reference(&fetched, scope, class);
            }
            Some(fetched) => self.diagnose(
                node,
                &format!("external reference {anchor} has unexpected root <{}>", fetched.name),
            ),
            None => self.diagnose(node, &format!("external reference {anchor} could not be resolved")),
        }
    }
}

/// Normative/informative class from a section title.
///
/// `informative` is checked first because "non-normative" contains `normative`.
fn classify(title: &str) -> Option<MetaSlug> {
    let title = title.to_lowercase();
    if title.contains("informative") || title.contains("non-normative") {
        Some(MetaSlug::Informative)
    } else if title.contains("normative") {
        Some(MetaSlug::Normative)
    } else {
        None
    }
}

/// `.../reference.RFC.2119.xml` -> `RFC.2119`.
fn anchor_from_href(href: &str) -> Option<String> {
    let file = href.trim().rsplit('/').next()?;
    let stem = file.strip_suffix(".xml").unwrap_or(file);
    let anchor = stem.strip_prefix("reference.").unwrap_or(stem);
    (!anchor.is_empty()).then(|| anchor.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify() {
        assert_eq!(classify("Normative References"), Some(MetaSlug::Normative));
        assert_eq!(classify("Informative References"), Some(MetaSlug::Informative));
        assert_eq!(classify("Non-Normative References"), Some(MetaSlug::Informative));
        assert_eq!(classify("References"), None);
    }

    #[test]
    fn test_anchor_from_href() {
        assert_eq!(
            anchor_from_href("https://bib.ietf.org/public/rfc/bibxml/reference.RFC.2119.xml"),
            Some("RFC.2119".to_owned())
        );
        assert_eq!(
            anchor_from_href("reference.I-D.ietf-opsec-v6.xml"),
            Some("I-D.ietf-opsec-v6".to_owned())
        );
        assert_eq!(anchor_from_href("https://example.com/"), None);
    }
}
