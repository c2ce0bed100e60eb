use scraper::{ElementRef, Html, Selector};
use url::Url;

const HIDDEN_TEXT_PARENTS: [&str; 4] = ["script", "style", "template", "noscript"];

fn anchor_selector() -> Selector {
    Selector::parse("a[href]").expect("anchor selector is valid")
}

fn main_selector() -> Selector {
    Selector::parse("main").expect("main selector is valid")
}

fn body_selector() -> Selector {
    Selector::parse("body").expect("body selector is valid")
}

/// Resolves every `<a href>` in the page against `base`, skipping hrefs that don't resolve.
pub fn resolved_anchor_urls(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    document
        .select(&anchor_selector())
        .filter_map(|tag| tag.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .collect()
}

/// Text of the first `<main>`, or of `<body>` when there is none.
/// Text nodes are trimmed and joined with a single space.
pub fn main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&main_selector())
        .next()
        .or_else(|| document.select(&body_selector()).next())
        .map(visible_text)
        .unwrap_or_default()
}

fn visible_text(root: ElementRef) -> String {
    let mut parts: Vec<&str> = vec![];

    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .is_some_and(|name| HIDDEN_TEXT_PARENTS.contains(&name));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}
