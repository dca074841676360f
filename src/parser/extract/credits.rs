use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::parser::dom::{normalized_text, parent_element, select_first};
use crate::record::CastMember;

static PERSON_HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"name/(nm\d+)").unwrap());

static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static NAME_CELL_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td:not(.primary_photo) a").unwrap());
static LIST: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());
static ANY_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[href]").unwrap());
static CAST_CAROUSEL_ACTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="title-cast-item"] [data-testid="title-cast-item__actor"]"#)
        .unwrap()
});

static DIRECTOR_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#director ~ table").unwrap());
static WRITER_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#writer ~ table").unwrap());
static CAST_TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#cast ~ table").unwrap());

static DIRECTOR_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[href*="fullcredits/director"]"#).unwrap());
static WRITER_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[href*="fullcredits/writer"]"#).unwrap());
static CAST_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[href*="fullcredits/cast"]"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Director,
    Writer,
    Cast,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Writer => "writer",
            Role::Cast => "cast",
        }
    }

    /// Table following the `#<role>` heading on the full-credits page.
    fn table(self) -> &'static Selector {
        match self {
            Role::Director => &*DIRECTOR_TABLE,
            Role::Writer => &*WRITER_TABLE,
            Role::Cast => &*CAST_TABLE,
        }
    }

    /// "See full credits" link next to the short list on the main page.
    fn fullcredits_link(self) -> &'static Selector {
        match self {
            Role::Director => &*DIRECTOR_LINK,
            Role::Writer => &*WRITER_LINK,
            Role::Cast => &*CAST_LINK,
        }
    }
}

/// People credited for `role`, in page order. Tries the full-credits table
/// first and falls back to the short lists on the main title page.
pub fn extract(doc: &Html, role: Role) -> Vec<CastMember> {
    let people = from_table(doc, role);
    if !people.is_empty() {
        return people;
    }
    let people = from_link_list(doc, role);
    if !people.is_empty() {
        debug!(role = role.as_str(), count = people.len(), "credits from link list");
        return people;
    }
    if role == Role::Cast {
        let people: Vec<_> = doc.select(&CAST_CAROUSEL_ACTOR).filter_map(cast_member).collect();
        if !people.is_empty() {
            debug!(count = people.len(), "cast from carousel");
        }
        return people;
    }
    Vec::new()
}

fn from_table(doc: &Html, role: Role) -> Vec<CastMember> {
    let Some(table) = doc.select(role.table()).next() else {
        return Vec::new();
    };
    table
        .select(&ROW)
        .filter_map(|tr| select_first(tr, &NAME_CELL_LINK))
        .filter_map(cast_member)
        .collect()
}

fn from_link_list(doc: &Html, role: Role) -> Vec<CastMember> {
    let list = doc
        .select(role.fullcredits_link())
        .next()
        .and_then(parent_element)
        .and_then(|parent| select_first(parent, &LIST));
    match list {
        Some(ul) => ul.select(&ANY_LINK).filter_map(cast_member).collect(),
        None => Vec::new(),
    }
}

/// Person id from the href plus display name; both must be present.
fn cast_member(a: ElementRef<'_>) -> Option<CastMember> {
    let href = a.value().attr("href")?;
    let id = PERSON_HREF_RE.captures(href)?.get(1)?.as_str().to_string();
    let name = normalized_text(a)?;
    Some(CastMember(id, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    fn ids(people: &[CastMember]) -> Vec<(&str, &str)> {
        people.iter().map(|p| (p.id(), p.name())).collect()
    }

    const FULLCREDITS: &str = r#"
        <h4 id="director" class="dataHeaderWithBorder">Directed by</h4>
        <table class="simpleTable simpleCreditsTable">
          <tbody>
            <tr><td class="name"><a href="/name/nm0001104/?ref_=ttfc_fc_dr1"> Frank Darabont </a></td></tr>
          </tbody>
        </table>
        <h4 id="writer" class="dataHeaderWithBorder">Writing Credits</h4>
        <table class="simpleTable simpleCreditsTable">
          <tbody>
            <tr><td class="name"><a href="/name/nm0000175/">Stephen King</a></td><td>(short story)</td></tr>
            <tr><td colspan="3">&nbsp;</td></tr>
            <tr><td class="name"><a href="/name/nm0001104/">Frank Darabont</a></td><td>(screenplay)</td></tr>
          </tbody>
        </table>
        <h4 id="cast" class="dataHeaderWithBorder">Cast</h4>
        <table class="cast_list">
          <tr><td class="primary_photo"><a href="/name/nm0000209/"><img alt="Tim Robbins"></a></td>
              <td><a href="/name/nm0000209/"> Tim Robbins
              </a></td><td class="character">Andy Dufresne</td></tr>
          <tr><td class="primary_photo"><a href="/name/nm0000151/"><img alt="Morgan Freeman"></a></td>
              <td><a href="/name/nm0000151/">Morgan Freeman</a></td></tr>
        </table>
    "#;

    #[test]
    fn tables_by_role() {
        let d = doc(FULLCREDITS);
        assert_eq!(ids(&extract(&d, Role::Director)), vec![("nm0001104", "Frank Darabont")]);
        assert_eq!(
            ids(&extract(&d, Role::Writer)),
            vec![("nm0000175", "Stephen King"), ("nm0001104", "Frank Darabont")]
        );
    }

    #[test]
    fn cast_skips_photo_cell() {
        let d = doc(FULLCREDITS);
        assert_eq!(
            ids(&extract(&d, Role::Cast)),
            vec![("nm0000209", "Tim Robbins"), ("nm0000151", "Morgan Freeman")]
        );
    }

    #[test]
    fn fallback_link_list() {
        let d = doc(r#"
            <ul>
              <li><a href="/title/tt0111161/fullcredits/director?ref_=tt_ov_dr">Director</a>
                <div><ul><li><a href="/name/nm0001104/?ref_=tt_ov_dr">Frank Darabont</a></li></ul></div></li>
              <li><a href="/title/tt0111161/fullcredits/writer">Writers</a>
                <ul>
                  <li><a href="/name/nm0000175/">Stephen King</a></li>
                  <li><a href="/name/nm0001104/">Frank Darabont</a></li>
                  <li><a href="/title/tt0111161/fullcredits/writer">All writers</a></li>
                  <li><a href="/name/nm0000001/">  </a></li>
                </ul></li>
            </ul>
        "#);
        assert_eq!(ids(&extract(&d, Role::Director)), vec![("nm0001104", "Frank Darabont")]);
        assert_eq!(
            ids(&extract(&d, Role::Writer)),
            vec![("nm0000175", "Stephen King"), ("nm0001104", "Frank Darabont")]
        );
        assert!(extract(&d, Role::Cast).is_empty());
    }

    #[test]
    fn cast_carousel_fallback() {
        let d = doc(r#"
            <div data-testid="title-cast-item"><a data-testid="title-cast-item__actor" href="/name/nm0000209/">Tim Robbins</a></div>
            <div data-testid="title-cast-item"><a data-testid="title-cast-item__actor" href="/name/nm0000151/">Morgan Freeman</a></div>
            <a data-testid="title-cast-item__actor" href="/name/nm9999999/">Outside</a>
        "#);
        assert_eq!(
            ids(&extract(&d, Role::Cast)),
            vec![("nm0000209", "Tim Robbins"), ("nm0000151", "Morgan Freeman")]
        );
    }

    #[test]
    fn empty_table_uses_fallback() {
        let d = doc(r#"
            <h4 id="director">Directed by</h4><table><tr><td>nobody</td></tr></table>
            <div><a href="/title/tt1/fullcredits/director">Director</a><ul><li><a href="/name/nm7/">Someone</a></li></ul></div>
        "#);
        assert_eq!(ids(&extract(&d, Role::Director)), vec![("nm7", "Someone")]);
    }

    #[test]
    fn nothing_found() {
        assert!(extract(&doc("<p>nothing</p>"), Role::Director).is_empty());
    }
}
