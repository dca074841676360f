use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::parser::dom::{leaves, normalized_text, parent_element, text_content};
use crate::parser::text::normalize_whitespace;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static ORIGINAL_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[data-testid*="original-title"]"#).unwrap());
static RATINGS_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[href*="/ratings/"]"#).unwrap());
static RELEASE_INFO_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[href*="/releaseinfo"]"#).unwrap());
static RUNTIME_VALUE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="title-techspec_runtime"] > :last-child"#).unwrap()
});
static LANGUAGE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[href*="primary_language="]"#).unwrap());

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+[.,]\d+)\s*$").unwrap());
static OUT_OF_TEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\s*10\s*$").unwrap());
static VOTE_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:[,.]\d{3})*)\s*$").unwrap());
static RUNTIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(\d+)\s*(?:hours?|stunden?)\s+)?(\d+)\s*(?:minutes?|minuten?)").unwrap()
});
static LANGUAGE_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]primary_language=([^&#]*)").unwrap());

/// First-level heading text. Also used as the person name.
pub fn heading(doc: &Html) -> Option<String> {
    doc.select(&H1).next().and_then(normalized_text)
}

pub fn original_title(doc: &Html) -> Option<String> {
    let container = doc.select(&ORIGINAL_TITLE).next()?;
    let text = text_content(container);
    let (_, rest) = text.split_once(':')?;
    let title = normalize_whitespace(rest);
    (!title.is_empty()).then_some(title)
}

/// Sibling leaf pairs `(earlier, later)` inside the ratings link.
///
/// Each leaf is compared only against the leaves enumerated before it, so
/// the order of candidates decides which pair wins when several match.
fn rating_candidates(doc: &Html) -> Vec<(ElementRef<'_>, ElementRef<'_>)> {
    let Some(container) = doc.select(&RATINGS_LINK).next() else {
        return Vec::new();
    };
    let leaves = leaves(container);
    let mut pairs = Vec::new();
    for (i, &later) in leaves.iter().enumerate() {
        for &earlier in &leaves[..i] {
            if earlier.parent() == later.parent() {
                pairs.push((earlier, later));
            }
        }
    }
    pairs
}

/// Score text such as `7.5` or `7,5` sitting next to a `/10` leaf. Bare
/// integers are not scores.
pub fn rating(doc: &Html) -> Option<String> {
    rating_candidates(doc).into_iter().find_map(|(score, scale)| {
        let score = text_content(score);
        let caps = SCORE_RE.captures(&score)?;
        if !OUT_OF_TEN_RE.is_match(&text_content(scale)) {
            return None;
        }
        Some(caps[1].replacen(',', ".", 1))
    })
}

/// Thousands-grouped vote count found by walking forward from a rating
/// leaf's parent through its following siblings.
pub fn rating_count(doc: &Html) -> Option<u64> {
    for (leaf, _) in rating_candidates(doc) {
        let Some(start) = parent_element(leaf) else {
            continue;
        };
        let siblings = std::iter::once(start)
            .chain(start.next_siblings().filter_map(ElementRef::wrap));
        for el in siblings {
            let text = text_content(el);
            if let Some(caps) = VOTE_COUNT_RE.captures(&text) {
                let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
                if let Ok(count) = digits.parse() {
                    return Some(count);
                }
            }
        }
    }
    None
}

pub fn release_year(doc: &Html) -> Option<String> {
    doc.select(&RELEASE_INFO_LINK).next().and_then(normalized_text)
}

pub fn duration(doc: &Html) -> Option<u32> {
    let el = doc.select(&RUNTIME_VALUE).next()?;
    parse_runtime(&text_content(el))
}

/// `"2 hours 15 minutes"` → 8100. Hours default to zero. The minute part is
/// required, so `"1 hour"` is `None`. Totals that overflow are `None`.
pub fn parse_runtime(text: &str) -> Option<u32> {
    let caps = RUNTIME_RE.captures(text)?;
    let hours: u32 = match caps.get(1) {
        Some(h) => h.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: u32 = caps[2].parse().ok()?;
    hours.checked_mul(3600)?.checked_add(minutes.checked_mul(60)?)
}

/// Language codes from `primary_language=` links, in document order.
pub fn languages(doc: &Html) -> Vec<String> {
    doc.select(&LANGUAGE_LINK)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let caps = LANGUAGE_PARAM_RE.captures(href)?;
            Some(caps[1].to_string())
        })
        .collect()
}
