//! Bibliographic entries and their single-line rendering.

use std::fmt::Write;

use crate::tree::{SourceNode, Tag};
use crate::util::collapse_whitespace;

/// Source of reference definitions that are not inline in the document.
pub trait ExternalReferences {
    /// Fetch the `<reference>` (or `<referencegroup>`) element for an anchor
    /// such as `RFC.2119`. Failures are reported by the implementation and
    /// surface here as `None`.
    fn resolve_external(&mut self, anchor: &str) -> Option<SourceNode>;
}

/// Resolved display name of an `<author>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorName {
    /// Person name, or the organization when no person name exists.
    pub name: String,
    /// Organization text, if an `organization` child is present.
    pub organization: Option<String>,
    /// `true` when `name` is the organization fallback.
    pub is_organization: bool,
}

impl AuthorName {
    /// Name with an `, <organization>` suffix for person authors.
    #[must_use]
    pub fn with_affiliation(&self) -> String {
        match &self.organization {
            Some(org) if !self.is_organization => format!("{}, {org}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Resolve an author's display name.
///
/// Order: `fullname`, then `initials` + `surname`, then the organization text.
#[must_use]
pub fn author_name(author: &SourceNode) -> Option<AuthorName> {
    let organization = author
        .child(&Tag::Organization)
        .map(|org| collapse_whitespace(&org.text_content()))
        .filter(|org| !org.is_empty());

    let person = author.non_empty_attr("fullname").map(collapse_whitespace).or_else(|| {
        let initials = author.attr("initials").unwrap_or_default();
        let surname = author.attr("surname").unwrap_or_default();
        let joined = collapse_whitespace(&format!("{initials} {surname}"));
        (!joined.is_empty()).then_some(joined)
    });

    match (person, organization) {
        (Some(name), organization) => Some(AuthorName {
            name,
            organization,
            is_organization: false,
        }),
        (None, Some(org)) => Some(AuthorName {
            name: org.clone(),
            organization: Some(org),
            is_organization: true,
        }),
        (None, None) => None,
    }
}

/// Bibliographic fields extracted from one `<reference>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub anchor: String,
    pub authors: Vec<String>,
    pub title: Option<String>,
    pub series: Vec<String>,
    pub date: Option<String>,
    pub target: Option<String>,
}

impl ReferenceEntry {
    /// Extract an entry. Returns `None` when the anchor is missing.
    #[must_use]
    pub fn from_node(node: &SourceNode) -> Option<Self> {
        let anchor = node.non_empty_attr("anchor")?.trim().to_owned();
        let front = node.child(&Tag::Front);

        let authors = front
            .into_iter()
            .flat_map(|f| f.children_with(&Tag::Author))
            .filter_map(author_name)
            .map(|a| a.name)
            .collect();

        let title = front
            .and_then(|f| f.child(&Tag::Title))
            .map(|t| collapse_whitespace(&t.text_content()))
            .filter(|t| !t.is_empty());

        let date = front.and_then(|f| f.child(&Tag::Date)).and_then(date_fragment);

        let mut series: Vec<String> = node
            .children_with(&Tag::SeriesInfo)
            .chain(front.into_iter().flat_map(|f| f.children_with(&Tag::SeriesInfo)))
            .filter_map(series_fragment)
            .collect();
        series.extend(
            node.children_with(&Tag::RefContent)
                .map(|c| collapse_whitespace(&c.text_content()))
                .filter(|c| !c.is_empty()),
        );

        Some(Self {
            anchor,
            authors,
            title,
            series,
            date,
            target: node.non_empty_attr("target").map(|t| t.trim().to_owned()),
        })
    }
}

fn series_fragment(info: &SourceNode) -> Option<String> {
    let name = info.attr("name").unwrap_or_default();
    let value = info.attr("value").unwrap_or_default();
    let joined = collapse_whitespace(&format!("{name} {value}"));
    (!joined.is_empty()).then_some(joined)
}

fn date_fragment(date: &SourceNode) -> Option<String> {
    let month = date.non_empty_attr("month").map(str::trim);
    let year = date.non_empty_attr("year").map(str::trim);
    match (month, year) {
        (Some(month), Some(year)) => Some(format!("{month} {year}")),
        (None, Some(year)) => Some(year.to_owned()),
        _ => None,
    }
}

/// Render an entry as one display line.
///
/// `[anchor]  authors, "title", series, date, target.`
#[must_use]
pub fn format_reference(entry: &ReferenceEntry) -> String {
    let mut out = format!("[{}]  ", entry.anchor);
    for author in entry.authors.iter().filter(|a| !a.is_empty()) {
        let _ = write!(out, "{author}, ");
    }
    if let Some(title) = &entry.title {
        let _ = write!(out, "\"{title}\", ");
    }
    for fragment in entry.series.iter().filter(|s| !s.is_empty()) {
        let _ = write!(out, "{fragment}, ");
    }
    if let Some(date) = &entry.date {
        let _ = write!(out, "{date}, ");
    }
    if let Some(target) = &entry.target {
        out.push_str(target);
    }
    let trimmed = out.trim_end().trim_end_matches(',');
    format!("{trimmed}.")
}
