//! Small helpers over a parsed `scraper::Html` document.

use scraper::{ElementRef, Html, Selector};

const MAX_TITLE_CHARS: usize = 200;

/// Concatenated text of an element, trimmed.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// First element matching any of `selectors`, tried in priority order.
///
/// Selectors that fail to parse are skipped with a debug log.
#[must_use]
pub fn select_first<'a>(document: &'a Html, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .filter_map(|raw| parse_selector(raw))
        .find_map(|selector| document.select(&selector).next())
}

/// Text of the first element with non-empty text, selectors tried in
/// priority order.
#[must_use]
pub fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|raw| parse_selector(raw))
        .find_map(|selector| {
            document
                .select(&selector)
                .map(element_text)
                .find(|text| !text.is_empty())
        })
}

fn parse_selector(raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!(selector = raw, error = %e, "skipping unparseable selector");
            None
        }
    }
}

/// First element in document order satisfying `predicate`.
pub fn find_element<'a, P>(document: &'a Html, mut predicate: P) -> Option<ElementRef<'a>>
where
    P: FnMut(ElementRef<'a>) -> bool,
{
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| predicate(*element))
}

/// Case-insensitive substring match on an attribute value.
#[must_use]
pub fn attr_contains(element: ElementRef<'_>, attr: &str, needle: &str) -> bool {
    element
        .value()
        .attr(attr)
        .is_some_and(|value| value.to_lowercase().contains(needle))
}

/// Lowercased page text with `<script>`, `<style>` and `<noscript>` bodies left out.
#[must_use]
pub fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name().to_owned()))
            .is_some_and(|name| matches!(name.as_str(), "script" | "style" | "noscript"));
        if !hidden {
            out.push_str(text);
            out.push(' ');
        }
    }
    out.to_lowercase()
}

/// Text of the document's `<title>` element, if non-empty.
#[must_use]
pub fn document_title(document: &Html) -> Option<String> {
    first_text(document, &["title"])
}

/// Collapses internal whitespace and truncates to 200 characters with `...`.
#[must_use]
pub fn clean_title(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = collapsed.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}...", truncated.trim_end())
    } else {
        collapsed
    }
}
