//! DOM helpers shared by the listing parser and the entry extractor.
//!
//! Navigation mirrors what the site's markup needs: element children,
//! the next element sibling, and loose text around an element.
//!
//! Class selectors match the whole `class` attribute, so `class="plainlist nav"`
//! is not a `plainlist` list.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

pub static LISTING_ANCHORS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"ul[class="plainlist"] > li > a"#).expect("valid selector")
});

pub static PROJECTS_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[class="projects"]"#).expect("valid selector"));

pub static TOOLS_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[class="tools"]"#).expect("valid selector"));

pub static BOTTOM_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[class="bottomblock"]"#).expect("valid selector"));

/// Direct element children, skipping text and comments.
pub fn element_children<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// First element sibling after `element`.
pub fn next_element<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Tag name of an element.
pub fn tag<'a>(element: &ElementRef<'a>) -> &'a str {
    element.value().name()
}

/// All descendant text, trimmed.
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text nodes directly following `element` up to the next element, trimmed.
pub fn trailing_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.next_siblings() {
        if node.value().is_element() {
            break;
        }
        if let Some(text) = node.value().as_text() {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}
