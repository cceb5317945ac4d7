//! Shared text utilities.

/// Collapse every run of whitespace to a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap at `width` columns.
///
/// Words longer than `width` get a line of their own. Spacing between words
/// on the same line is kept as given; the gap at a line break is dropped.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_len = 0;
    let mut gap = 0;
    let mut rest = text.trim();
    while !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(end);
        let word_len = word.chars().count();
        if line_len == 0 {
            line_len = word_len;
        } else if line_len + gap + word_len > width {
            out.push('\n');
            line_len = word_len;
        } else {
            out.extend(std::iter::repeat_n(' ', gap));
            line_len += gap + word_len;
        }
        out.push_str(word);
        rest = tail.trim_start();
        gap = tail[..tail.len() - rest.len()].chars().count();
    }
    out
}

/// Wrap a paragraph while keeping a leading marker (`- `, `> `, `1. `) and
/// indenting continuation lines to match it.
#[must_use]
pub fn wrap_with_prefix(prefix: &str, text: &str, width: usize, hanging: &str) -> String {
    let available = width.saturating_sub(prefix.chars().count()).max(1);
    let wrapped = wrap_text(text, available);
    let mut out = String::with_capacity(wrapped.len() + prefix.len());
    for (i, line) in wrapped.lines().enumerate() {
        if i == 0 {
            out.push_str(prefix);
        } else {
            out.push('\n');
            out.push_str(hanging);
        }
        out.push_str(line);
    }
    if out.is_empty() {
        out.push_str(prefix.trim_end());
    }
    out
}
