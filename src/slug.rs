//! Company code derivation.

/// Codes longer than this are truncated at a separator-free boundary.
const MAX_SLUG_LEN: usize = 80;

/// Derive a lower-cased, URL-safe code from a display name.
///
/// ASCII alphanumerics are kept; every run of other ASCII characters
/// collapses into a single `-`. Non-ASCII characters, accented letters
/// included, are dropped without adding a separator. Leading and
/// trailing separators are trimmed, so a name without any alphanumeric
/// character yields an empty string.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if ch.is_ascii() && !slug.is_empty() && !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}
