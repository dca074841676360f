use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::parser::text::zero_pad;

static TIME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("time").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)-(\d+)$").unwrap());

pub use super::title::heading as name;

/// Machine-readable date of the first `<time>` element as `YYYY-MM-DD`.
pub fn birthday(doc: &Html) -> Option<String> {
    let time = doc.select(&TIME).next()?;
    normalize_date(time.value().attr("datetime")?)
}

/// `1990-1-2` → `1990-01-02`
pub fn normalize_date(raw: &str) -> Option<String> {
    let caps = DATE_RE.captures(raw)?;
    Some(format!(
        "{}-{}-{}",
        zero_pad(&caps[1], 4),
        zero_pad(&caps[2], 2),
        zero_pad(&caps[3], 2)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_components() {
        assert_eq!(normalize_date("1990-1-2").as_deref(), Some("1990-01-02"));
        assert_eq!(normalize_date("1937-06-01").as_deref(), Some("1937-06-01"));
        assert_eq!(normalize_date("800-3-14").as_deref(), Some("0800-03-14"));
        assert_eq!(normalize_date("1937-06"), None);
        assert_eq!(normalize_date("June 1, 1937"), None);
    }

    #[test]
    fn first_time_element() {
        let d = Html::parse_document(
            r#"<div id="name-born-info">Born: <time datetime="1937-6-1">June 1, 1937</time></div>
               <div id="name-death-info"><time datetime="2020-1-1">x</time></div>"#,
        );
        assert_eq!(birthday(&d).as_deref(), Some("1937-06-01"));
    }

    #[test]
    fn missing_or_odd_datetime() {
        let d = Html::parse_document(r#"<time>June 1, 1937</time>"#);
        assert_eq!(birthday(&d), None);
        let d = Html::parse_document(r#"<time datetime="1937">1937</time>"#);
        assert_eq!(birthday(&d), None);
    }
}
