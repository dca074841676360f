use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A credited person: `(person id, display name)`, serialized as a 2-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember(pub String, pub String);

#[cfg(test)]
impl CastMember {
    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn name(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub id: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directors: Option<Vec<CastMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writers: Option<Vec<CastMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastMember>>,
    /// Runtime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl TitleRecord {
    pub fn new(id: &str, timestamp: i64) -> Self {
        TitleRecord {
            id: id.to_string(),
            timestamp,
            ..Default::default()
        }
    }

    /// True once anything beyond `id`/`timestamp` is set.
    pub fn has_fields(&self) -> bool {
        self.title.is_some()
            || self.original_title.is_some()
            || self.rating.is_some()
            || self.rating_count.is_some()
            || self.year.is_some()
            || self.directors.is_some()
            || self.writers.is_some()
            || self.cast.is_some()
            || self.duration.is_some()
            || self.languages.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Describes the title itself, e.g. "in production".
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmCredit {
    pub id: String,
    /// Role markers in the order they were found; repeats are kept.
    pub credit_type: Vec<String>,
    /// Free-text qualifiers of the person's involvement.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub title_info: TitleInfo,
}

impl FilmCredit {
    pub fn new(id: &str) -> Self {
        FilmCredit {
            id: id.to_string(),
            credit_type: Vec::new(),
            tags: BTreeSet::new(),
            title_info: TitleInfo::default(),
        }
    }
}

/// Credits keyed by title id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filmography(BTreeMap<String, FilmCredit>);

impl Filmography {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the credit for `title_id`. Existing entries are returned
    /// untouched so that later fragments merge into them.
    pub fn upsert(&mut self, title_id: &str) -> &mut FilmCredit {
        self.0
            .entry(title_id.to_string())
            .or_insert_with(|| FilmCredit::new(title_id))
    }

    #[cfg(test)]
    pub fn get(&self, title_id: &str) -> Option<&FilmCredit> {
        self.0.get(title_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filmography: Option<Filmography>,
}

impl PersonRecord {
    pub fn new(id: &str, timestamp: i64) -> Self {
        PersonRecord {
            id: id.to_string(),
            timestamp,
            ..Default::default()
        }
    }

    pub fn has_fields(&self) -> bool {
        self.name.is_some() || self.birthday.is_some() || self.filmography.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeResult {
    Title(TitleRecord),
    Person(PersonRecord),
}

impl ScrapeResult {
    pub fn id(&self) -> &str {
        match self {
            ScrapeResult::Title(t) => &t.id,
            ScrapeResult::Person(p) => &p.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeResult::Title(_) => "title",
            ScrapeResult::Person(_) => "person",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_json_shape() {
        let mut t = TitleRecord::new("tt0111161", 1_700_000_000);
        t.rating = Some("9.3".into());
        t.cast = Some(vec![CastMember("nm0000209".into(), "Tim Robbins".into())]);
        let json = serde_json::to_value(ScrapeResult::Title(t)).unwrap();
        assert_eq!(json["title"]["id"], "tt0111161");
        assert_eq!(json["title"]["rating"], "9.3");
        assert_eq!(json["title"]["cast"][0][0], "nm0000209");
        assert_eq!(json["title"]["cast"][0][1], "Tim Robbins");
        assert!(json["title"].get("original_title").is_none());
    }

    #[test]
    fn empty_records_have_no_fields() {
        assert!(!TitleRecord::new("tt1", 0).has_fields());
        assert!(!PersonRecord::new("nm1", 0).has_fields());
    }

    #[test]
    fn upsert_reuses_entry() {
        let mut f = Filmography::new();
        f.upsert("tt1").credit_type.push("actor".into());
        f.upsert("tt1").credit_type.push("producer".into());
        assert_eq!(f.len(), 1);
        assert_eq!(f.get("tt1").unwrap().credit_type, vec!["actor", "producer"]);
    }

    #[test]
    fn filmography_serializes_as_map() {
        let mut f = Filmography::new();
        f.upsert("tt2").tags.insert("TV Series".into());
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["tt2"]["id"], "tt2");
        assert_eq!(json["tt2"]["tags"][0], "TV Series");
        assert!(json["tt2"]["title_info"]["tags"].as_array().unwrap().is_empty());
    }
}
