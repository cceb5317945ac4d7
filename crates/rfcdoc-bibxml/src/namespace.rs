//! Anchor namespaces and their bibxml base locations.

/// Built-in namespace table. Each base is followed by the full anchor and
/// `.xml` to form the fetch URL.
pub const DEFAULT_SOURCES: [(&str, &str); 18] = [
    ("RFC", "https://bib.ietf.org/public/rfc/bibxml/reference."),
    ("I-D", "https://bib.ietf.org/public/rfc/bibxml3/reference."),
    ("W3C", "https://bib.ietf.org/public/rfc/bibxml4/reference."),
    ("3GPP", "https://bib.ietf.org/public/rfc/bibxml5/reference."),
    ("IEEE", "https://bib.ietf.org/public/rfc/bibxml6/reference."),
    ("DOI", "https://bib.ietf.org/public/rfc/bibxml7/reference."),
    ("IANA", "https://bib.ietf.org/public/rfc/bibxml8/reference."),
    ("BCP", "https://bib.ietf.org/public/rfc/bibxml9/reference."),
    ("STD", "https://bib.ietf.org/public/rfc/bibxml9/reference."),
    ("FYI", "https://bib.ietf.org/public/rfc/bibxml9/reference."),
    ("ANSI", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
    ("CCITT", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
    ("FIPS", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
    ("ISO", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
    ("ITU", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
    ("NIST", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
    ("OASIS", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
    ("PKCS", "https://bib.ietf.org/public/rfc/bibxml2/reference."),
];

/// Namespace token of an anchor: everything before the first `.`.
///
/// `RFC.2119` -> `RFC`, `I-D.ietf-quic-transport` -> `I-D`. Anchors without
/// a dot have no namespace.
#[must_use]
pub fn namespace_of(anchor: &str) -> Option<&str> {
    let (namespace, rest) = anchor.split_once('.')?;
    (!namespace.is_empty() && !rest.is_empty()).then_some(namespace)
}
