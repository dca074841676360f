pub mod dom;
pub mod extract;
pub mod text;

use tracing::debug;

use crate::page::{Page, PageKind};
use crate::record::ScrapeResult;

/// Classify the page, run the matching probes and stamp the current time.
pub fn scrape(page: &Page) -> Option<ScrapeResult> {
    scrape_at(page, chrono::Utc::now().timestamp())
}

/// Same as [`scrape`] with a caller-supplied timestamp (epoch seconds).
pub fn scrape_at(page: &Page, timestamp: i64) -> Option<ScrapeResult> {
    let Some(kind) = page.kind() else {
        debug!(path = page.path(), "unrecognized page");
        return None;
    };
    match kind {
        PageKind::Title { id, fullcredits } => {
            extract::title_record(page.html(), id, fullcredits, timestamp).map(ScrapeResult::Title)
        }
        PageKind::Person { id } => {
            extract::person_record(page.html(), id, timestamp).map(ScrapeResult::Person)
        }
    }
}
