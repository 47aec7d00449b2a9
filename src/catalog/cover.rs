//! Cover URL resolution.
//!
//! Picks the best available identifier on a record and templates it into the
//! cover endpoint. Pure and total: a record with no identifiers simply has no cover.

use super::types::SearchResultItem;

/// Size suffix requested from the cover endpoint.
const COVER_SIZE: &str = "M";

/// Shown when a record has neither a cover nor a usable title.
pub const GENERIC_PLACEHOLDER: &str = "?";

/// Resolves the cover image URL for `item`.
///
/// Priority: numeric cover id, then the first ISBN, then the cover edition key.
/// `covers_base` is the cover endpoint without a trailing slash.
pub fn cover_url(item: &SearchResultItem, covers_base: &str) -> Option<String> {
    if let Some(id) = item.cover_i {
        return Some(format!("{}/b/id/{}-{}.jpg", covers_base, id, COVER_SIZE));
    }

    if let Some(isbn) = item.isbn.first() {
        return Some(format!("{}/b/isbn/{}-{}.jpg", covers_base, isbn, COVER_SIZE));
    }

    item.cover_edition_key
        .as_ref()
        .map(|olid| format!("{}/b/olid/{}-{}.jpg", covers_base, olid, COVER_SIZE))
}

/// Text for the placeholder tile drawn when `cover_url` returns `None`:
/// the first two characters of the title, uppercased.
pub fn placeholder_initials(title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.chars().take(2).collect::<String>().to_uppercase(),
        None => GENERIC_PLACEHOLDER.to_string(),
    }
}
