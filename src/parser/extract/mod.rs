pub mod credits;
pub mod filmography;
pub mod person;
pub mod title;

use scraper::Html;
use tracing::debug;

use crate::record::{PersonRecord, TitleRecord};
use credits::Role;

/// Title-page record. On the full-credits sub-page only the credit lists
/// are read. `None` when nothing beyond id and timestamp was found.
pub fn title_record(doc: &Html, id: &str, fullcredits: bool, timestamp: i64) -> Option<TitleRecord> {
    let mut record = TitleRecord::new(id, timestamp);

    if !fullcredits {
        record.title = title::heading(doc);
        record.original_title = title::original_title(doc);
        record.rating = title::rating(doc);
        record.rating_count = title::rating_count(doc);
        record.year = title::release_year(doc);
        record.duration = title::duration(doc);
        record.languages = non_empty(title::languages(doc));
    }
    record.directors = non_empty(credits::extract(doc, Role::Director));
    record.writers = non_empty(credits::extract(doc, Role::Writer));
    record.cast = non_empty(credits::extract(doc, Role::Cast));

    debug!(
        id,
        fullcredits,
        title = record.title.is_some(),
        rating = record.rating.is_some(),
        directors = record.directors.as_ref().map_or(0, Vec::len),
        writers = record.writers.as_ref().map_or(0, Vec::len),
        cast = record.cast.as_ref().map_or(0, Vec::len),
        "title probes done"
    );

    record.has_fields().then_some(record)
}

/// Person-page record, `None` when nothing beyond id and timestamp was found.
pub fn person_record(doc: &Html, id: &str, timestamp: i64) -> Option<PersonRecord> {
    let mut record = PersonRecord::new(id, timestamp);
    record.name = person::name(doc);
    record.birthday = person::birthday(doc);
    let filmography = filmography::extract(doc);
    debug!(id, credits = filmography.len(), "person probes done");
    if !filmography.is_empty() {
        record.filmography = Some(filmography);
    }

    record.has_fields().then_some(record)
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

// ── Tests ──
