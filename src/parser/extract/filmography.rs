use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::parser::dom::{find_attr_containing, is_within, normalized_text, select_first, text_content};
use crate::parser::text::{normalize_whitespace, parse_leading_int};
use crate::record::{FilmCredit, Filmography};

static CREDIT_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse(r#"[id*="-tt"]"#).unwrap());
static YEAR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".year_column").unwrap());
static ROW_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*)-(tt\d+)$").unwrap());
static ENCLOSING_PARENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\((.*)\)$").unwrap());

const TAG_SEPARATOR: &str = ") (";

/// Credits from every `<role>-<title id>` element on a person page.
/// Several rows for the same title merge into one entry.
pub fn extract(doc: &Html) -> Filmography {
    let mut filmography = Filmography::new();
    for row in doc.select(&CREDIT_ROW) {
        let Some(caps) = row.value().id().and_then(|id| ROW_ID_RE.captures(id)) else {
            continue;
        };
        let credit = filmography.upsert(&caps[2]);
        credit.credit_type.push(caps[1].to_string());
        merge_row(credit, row);
    }
    filmography
}

fn merge_row(credit: &mut FilmCredit, row: ElementRef<'_>) {
    let title_link = find_attr_containing(row, "href", &credit.id);
    if let Some(title) = title_link.and_then(normalized_text) {
        credit.title_info.title = Some(title);
    }

    let year_cell = select_first(row, &YEAR);
    if let Some(year) = year_cell.and_then(normalized_text).and_then(|y| parse_leading_int(&y)) {
        credit.title_info.year = Some(year);
    }

    // Only the first line of the row carries tags; title and year are
    // already consumed above.
    let mut tag_text = String::new();
    for child in row.children() {
        match ElementRef::wrap(child) {
            Some(el) if el.value().name() == "br" => break,
            Some(el) if is_in_production_link(el) => {
                if let Some(tag) = normalized_text(el) {
                    credit.title_info.tags.insert(tag);
                }
            }
            Some(el) => {
                let consumed = title_link.is_some_and(|t| is_within(t, el))
                    || year_cell.is_some_and(|y| is_within(y, el));
                if !consumed {
                    tag_text.push_str(&text_content(el));
                }
            }
            None => {
                if let Some(text) = child.value().as_text() {
                    tag_text.push_str(text);
                }
            }
        }
    }

    for tag in split_tags(&tag_text) {
        credit.tags.insert(tag);
    }
}

fn is_in_production_link(el: ElementRef<'_>) -> bool {
    el.value().name() == "a" && el.value().classes().any(|c| c == "in_production")
}

/// `"(TV Series) (2020)"` → `["TV Series", "2020"]`
pub fn split_tags(raw: &str) -> Vec<String> {
    let text = normalize_whitespace(raw);
    let inner = match ENCLOSING_PARENS_RE.captures(&text) {
        Some(caps) => caps[1].to_string(),
        None => text,
    };
    inner
        .split(TAG_SEPARATOR)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
