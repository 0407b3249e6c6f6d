//! Filesystem-safe story filenames derived from titles.
//!
//! Slug assignment is a pure function of (title, used-names set): the same
//! title sequence always yields the same filenames.

use std::collections::HashSet;

pub const MAX_SLUG_LEN: usize = 80;

/// Collapse every run of characters outside `[A-Za-z0-9]` into a single
/// hyphen, strip leading/trailing hyphens, lower-case, and cap the length.
/// An empty result becomes the literal slug `story`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("story");
    }
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// Produce a unique `.html` filename for this run. Colliding slugs get `-2`,
/// `-3`, ... suffixes; the base is truncated so the full name (including the
/// suffix) never exceeds [`MAX_SLUG_LEN`]. The chosen name is recorded in
/// `used` before returning.
pub fn unique_file_name(title: &str, used: &mut HashSet<String>) -> String {
    let slug = slugify(title);
    let mut candidate = slug.clone();
    let mut counter = 1usize;
    while used.contains(&candidate) {
        counter += 1;
        let suffix = format!("-{counter}");
        let base = &slug[..slug.len().min(MAX_SLUG_LEN - suffix.len())];
        candidate = format!("{base}{suffix}");
    }
    used.insert(candidate.clone());
    format!("{candidate}.html")
}
