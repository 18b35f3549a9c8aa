//! Listing page parsing.

use scraper::Html;

use crate::html::LISTING_ANCHORS;

/// Collects the `href` of every anchor directly under a `plainlist` list item,
/// in page order. The list's class must be exactly `plainlist`.
///
/// An empty result marks the end of pagination.
///
/// # Errors
///
/// Returns a description of the first anchor lacking an `href`.
pub fn entry_paths(html: &str) -> Result<Vec<String>, String> {
    let document = Html::parse_document(html);
    document
        .select(&LISTING_ANCHORS)
        .map(|anchor| {
            anchor
                .value()
                .attr("href")
                .map(str::to_string)
                .ok_or_else(|| format!("anchor '{}' has no href", anchor.html()))
        })
        .collect()
}

/// Numeric entry ID from the final segment of an entry path (`/projects/42`).
pub fn entry_id(path: &str) -> Option<u32> {
    path.rsplit('/').next()?.parse().ok()
}
