//! `docProps/core.xml` generation.

use chrono::{DateTime, NaiveDate, Utc};
use rfcdoc_renderer::{MetaSlug, Metadata};

use crate::body::escape_xml;

/// Value of `cp:lastModifiedBy`.
pub const LAST_MODIFIED_BY: &str = "rfcdoc";

/// Accepted document date layouts (full and abbreviated month names).
const DATE_FORMATS: [&str; 2] = ["%d %B %Y", "%d %b %Y"];

/// Core document properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreProperties {
    pub title: Option<String>,
    /// Authors joined with `, `.
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub last_modified_by: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl CoreProperties {
    /// Build properties from walk metadata. `now` is the modification time
    /// and the fallback creation time.
    #[must_use]
    pub fn from_metadata(metadata: &Metadata, now: DateTime<Utc>) -> Self {
        let joined = |slug| {
            let values = metadata.values(slug);
            (!values.is_empty()).then(|| values.join(", "))
        };
        Self {
            title: metadata.get(MetaSlug::Title).map(str::to_owned),
            creator: joined(MetaSlug::Authors),
            keywords: joined(MetaSlug::Keywords),
            last_modified_by: LAST_MODIFIED_BY.to_owned(),
            created: metadata
                .get(MetaSlug::Date)
                .map_or(now, |date| parse_document_date(date, now)),
            modified: now,
        }
    }

    /// Serialize as `docProps/core.xml`.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
            r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
            r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        ));
        if let Some(title) = &self.title {
            xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
        }
        if let Some(creator) = &self.creator {
            xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(creator)));
        }
        if let Some(keywords) = &self.keywords {
            xml.push_str(&format!("<cp:keywords>{}</cp:keywords>", escape_xml(keywords)));
        }
        xml.push_str(&format!(
            "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
            escape_xml(&self.last_modified_by)
        ));
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            w3cdtf(self.created)
        ));
        xml.push_str(&format!(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            w3cdtf(self.modified)
        ));
        xml.push_str("</cp:coreProperties>");
        xml
    }
}

fn w3cdtf(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse a document date such as `2 March 2024` or `Mar 2024`.
///
/// Dates without a day are retried with day 1. Anything else yields `now`.
#[must_use]
pub fn parse_document_date(text: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let candidates = [text.clone(), format!("1 {text}")];
    let parsed = candidates.iter().find_map(|candidate| {
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
    });
    match parsed.and_then(|date| date.and_hms_opt(0, 0, 0)) {
        Some(midnight) => midnight.and_utc(),
        None => {
            tracing::debug!(date = %text, "Unrecognized document date, using current time");
            now
        }
    }
}
