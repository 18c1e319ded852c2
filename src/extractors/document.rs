//! Document preprocessing and DOM helpers
//!
//! Non-content elements are detached from the tree before extraction. All
//! traversal here starts from an element and walks its descendants, so
//! detached subtrees are never visited again.

use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

/// Elements whose content only produces false positives downstream.
pub const NON_CONTENT_TAGS: &[&str] = &["script", "style", "nav", "header", "footer"];

/// Parse permissively and strip non-content markup.
pub fn parse_document(html: &str) -> Html {
    let mut document = Html::parse_document(html);
    strip_non_content(&mut document);
    document
}

/// Detach every script, style, nav, header and footer element.
pub fn strip_non_content(document: &mut Html) {
    let ids: Vec<_> = descendants(document.root_element())
        .filter(|el| NON_CONTENT_TAGS.contains(&el.value().name()))
        .map(|el| el.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Descendant elements in document order, excluding `element` itself.
pub fn descendants<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Descendants whose tag is one of `tags`.
pub fn find_all<'a>(
    element: ElementRef<'a>,
    tags: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    descendants(element).filter(move |el| tags.contains(&el.value().name()))
}

/// Text nodes trimmed, empty ones dropped, joined with `sep`.
pub fn text_with(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Text content exactly as it appears, line breaks included.
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Trimmed text content.
pub fn cell_text(element: ElementRef<'_>) -> String {
    raw_text(element).trim().to_string()
}

/// True if any single class, or the whole class attribute, matches `pattern`.
pub fn class_matches(element: ElementRef<'_>, pattern: &Regex) -> bool {
    let Some(class_attr) = element.value().attr("class") else {
        return false;
    };
    element.value().classes().any(|c| pattern.is_match(c)) || pattern.is_match(class_attr)
}

/// Resolve `src` against `base`. Without a usable base the link is returned as-is.
pub fn resolve_url(base: &str, src: &str) -> String {
    let src = src.trim();
    match Url::parse(base) {
        Ok(base) => base
            .join(src)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| src.to_string()),
        Err(_) => src.to_string(),
    }
}

/// The document's `<title>` text, if any.
pub fn title_text(document: &Html) -> Option<String> {
    find_all(document.root_element(), &["title"])
        .next()
        .map(raw_text)
}
