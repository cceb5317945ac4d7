//! Document-level facts accumulated while walking the source tree.

use std::collections::BTreeMap;

/// Metadata slot identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaSlug {
    Title,
    DocName,
    Category,
    Ipr,
    SubmissionType,
    Area,
    Workgroup,
    Keywords,
    Date,
    Obsoletes,
    Updates,
    Authors,
    Normative,
    Informative,
}

/// How repeated writes to a slug combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Every value is appended.
    Accumulate,
    /// The first value sticks.
    FirstWins,
    /// Each value replaces the previous one.
    LastWins,
}

impl MetaSlug {
    /// Key used in front matter and property echoes.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DocName => "docname",
            Self::Category => "category",
            Self::Ipr => "ipr",
            Self::SubmissionType => "submissiontype",
            Self::Area => "area",
            Self::Workgroup => "workgroup",
            Self::Keywords => "keyword",
            Self::Date => "date",
            Self::Obsoletes => "obsoletes",
            Self::Updates => "updates",
            Self::Authors => "author",
            Self::Normative => "normative",
            Self::Informative => "informative",
        }
    }

    /// Human-readable label, e.g. `Submission Type`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::DocName => "Document Name",
            Self::Category => "Category",
            Self::Ipr => "IPR",
            Self::SubmissionType => "Submission Type",
            Self::Area => "Area",
            Self::Workgroup => "Workgroup",
            Self::Keywords => "Keywords",
            Self::Date => "Date",
            Self::Obsoletes => "Obsoletes",
            Self::Updates => "Updates",
            Self::Authors => "Authors",
            Self::Normative => "Normative References",
            Self::Informative => "Informative References",
        }
    }

    #[must_use]
    pub fn policy(self) -> SlotPolicy {
        match self {
            Self::Authors | Self::Keywords | Self::Normative | Self::Informative => {
                SlotPolicy::Accumulate
            }
            Self::Date | Self::Title | Self::DocName => SlotPolicy::FirstWins,
            _ => SlotPolicy::LastWins,
        }
    }
}

/// Append-only metadata store.
///
/// Values are whitespace-trimmed; blank values are ignored.
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    slots: BTreeMap<MetaSlug, Vec<String>>,
    abstract_paragraphs: Vec<String>,
}

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value according to the slug's [`SlotPolicy`].
    ///
    /// Returns `true` when the store changed.
    pub fn record(&mut self, slug: MetaSlug, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let slot = self.slots.entry(slug).or_default();
        match slug.policy() {
            SlotPolicy::Accumulate => slot.push(value.to_owned()),
            SlotPolicy::FirstWins => {
                if !slot.is_empty() {
                    return false;
                }
                slot.push(value.to_owned());
            }
            SlotPolicy::LastWins => {
                slot.clear();
                slot.push(value.to_owned());
            }
        }
        true
    }

    /// Single value of a slug (the only value, or the first for lists).
    #[must_use]
    pub fn get(&self, slug: MetaSlug) -> Option<&str> {
        self.slots.get(&slug).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values of a slug, in insertion order.
    #[must_use]
    pub fn values(&self, slug: MetaSlug) -> &[String] {
        self.slots.get(&slug).map_or(&[], Vec::as_slice)
    }

    /// Every populated slug in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (MetaSlug, &[String])> {
        self.slots
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.as_slice()))
    }

    /// Capture one abstract paragraph.
    pub fn push_abstract(&mut self, paragraph: &str) {
        self.abstract_paragraphs.push(paragraph.to_owned());
    }

    #[must_use]
    pub fn abstract_paragraphs(&self) -> &[String] {
        &self.abstract_paragraphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_authors_accumulate() {
        let mut meta = Metadata::new();
        meta.record(MetaSlug::Authors, "Jane Doe, ExampleCorp");
        meta.record(MetaSlug::Authors, "J. Smith");
        assert_eq!(
            meta.values(MetaSlug::Authors),
            &["Jane Doe, ExampleCorp".to_owned(), "J. Smith".to_owned()]
        );
    }

    #[test]
    fn test_title_first_wins() {
        let mut meta = Metadata::new();
        assert!(meta.record(MetaSlug::Title, "First"));
        assert!(!meta.record(MetaSlug::Title, "Second"));
        assert_eq!(meta.get(MetaSlug::Title), Some("First"));
    }

    #[test]
    fn test_category_last_wins() {
        let mut meta = Metadata::new();
        meta.record(MetaSlug::Category, "info");
        meta.record(MetaSlug::Category, "std");
        assert_eq!(meta.values(MetaSlug::Category), &["std".to_owned()]);
    }

    #[test]
    fn test_blank_values_ignored() {
        let mut meta = Metadata::new();
        assert!(!meta.record(MetaSlug::Keywords, "   "));
        assert!(meta.values(MetaSlug::Keywords).is_empty());
        assert_eq!(meta.iter().count(), 0);
    }
}
