use scraper::{ElementRef, Selector};

use super::text::normalize_whitespace;

/// Every element under `root` without element children, depth-first,
/// left to right. A childless root is its own single leaf.
pub fn leaves(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut out = Vec::new();
    collect_leaves(root, &mut out);
    out
}

fn collect_leaves<'a>(el: ElementRef<'a>, out: &mut Vec<ElementRef<'a>>) {
    let mut children = el.children().filter_map(ElementRef::wrap).peekable();
    if children.peek().is_none() {
        out.push(el);
        return;
    }
    for child in children {
        collect_leaves(child, out);
    }
}

/// True when `node` is `root` or one of its descendants.
pub fn is_within(node: ElementRef<'_>, root: ElementRef<'_>) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.id() == root.id() {
            return true;
        }
        current = n.parent();
    }
    false
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Concatenated descendant text, like the DOM's `textContent`.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Normalized text content, `None` when nothing but whitespace is left.
pub fn normalized_text(el: ElementRef<'_>) -> Option<String> {
    let text = normalize_whitespace(&text_content(el));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn select_first<'a>(root: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    root.select(selector).next()
}

/// First descendant whose `attr` value contains `needle`.
pub fn find_attr_containing<'a>(
    root: ElementRef<'a>,
    attr: &str,
    needle: &str,
) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().attr(attr).is_some_and(|v| v.contains(needle)))
}
