use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Url;
use scraper::Html;

static TITLE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/title/(tt\d+)(/fullcredits)?/?$").unwrap());
static PERSON_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/name/(nm\d+)/?$").unwrap());

/// A parsed document plus the URL path it was loaded from.
pub struct Page {
    path: String,
    html: Html,
}

impl Page {
    pub fn parse(path: &str, markup: &str) -> Self {
        Page {
            path: path.to_string(),
            html: Html::parse_document(markup),
        }
    }

    /// Build a page from an absolute URL; query and fragment are dropped.
    pub fn from_url(url: &str, markup: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid page URL: {}", url))?;
        Ok(Self::parse(url.path(), markup))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn kind(&self) -> Option<PageKind<'_>> {
        classify(&self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind<'a> {
    Title { id: &'a str, fullcredits: bool },
    Person { id: &'a str },
}

/// Title paths are tried before person paths; no path matches both.
pub fn classify(path: &str) -> Option<PageKind<'_>> {
    if let Some(caps) = TITLE_PATH_RE.captures(path) {
        return Some(PageKind::Title {
            id: caps.get(1)?.as_str(),
            fullcredits: caps.get(2).is_some(),
        });
    }
    let caps = PERSON_PATH_RE.captures(path)?;
    Some(PageKind::Person {
        id: caps.get(1)?.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_paths() {
        assert_eq!(
            classify("/title/tt0111161/"),
            Some(PageKind::Title { id: "tt0111161", fullcredits: false })
        );
        assert_eq!(
            classify("/title/tt0111161"),
            Some(PageKind::Title { id: "tt0111161", fullcredits: false })
        );
        assert_eq!(
            classify("/title/tt0111161/fullcredits"),
            Some(PageKind::Title { id: "tt0111161", fullcredits: true })
        );
        assert_eq!(
            classify("/title/tt0111161/fullcredits/"),
            Some(PageKind::Title { id: "tt0111161", fullcredits: true })
        );
    }

    #[test]
    fn person_paths() {
        assert_eq!(classify("/name/nm0000151/"), Some(PageKind::Person { id: "nm0000151" }));
        assert_eq!(classify("/name/nm0000151"), Some(PageKind::Person { id: "nm0000151" }));
    }

    #[test]
    fn unrecognized_paths() {
        for path in [
            "/",
            "/title/",
            "/title/tt0111161/reviews",
            "/title/nm0000151/",
            "/name/tt0111161/",
            "/name/nm0000151/bio",
            "/chart/top/",
            "title/tt0111161/",
        ] {
            assert_eq!(classify(path), None, "{} should not classify", path);
        }
    }

    #[test]
    fn from_url_drops_query() {
        let page = Page::from_url("https://www.imdb.com/title/tt0111161/?ref_=nv_sr_1", "<html></html>").unwrap();
        assert_eq!(page.path(), "/title/tt0111161/");
        assert!(matches!(page.kind(), Some(PageKind::Title { id: "tt0111161", .. })));
    }

    #[test]
    fn from_url_rejects_garbage() {
        assert!(Page::from_url("not a url", "").is_err());
    }
}
