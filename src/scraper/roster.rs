use ::scraper::{ElementRef, Selector};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::model::{FighterQuery, Gender, Roster, NOT_AVAILABLE};
use crate::scraper::{self, build_url, element_text, select_text};

/// Listing filter for active athletes.
const ACTIVE_STATUS_FILTER: &str = "status:23";

/// Collect both gender partitions of the UFC athlete listing.
#[instrument(skip(client))]
pub(crate) async fn get_roster(client: &reqwest::Client, base_url: &str) -> Result<Roster> {
    let men = get_roster_partition(client, base_url, Gender::Men).await?;
    let women = get_roster_partition(client, base_url, Gender::Women).await?;
    info!(men = men.len(), women = women.len(), "collected roster");
    Ok(Roster { men, women })
}

/// Page through one partition from page 0 until a page comes back empty.
#[instrument(skip(client))]
pub(crate) async fn get_roster_partition(
    client: &reqwest::Client,
    base_url: &str,
    gender: Gender,
) -> Result<Vec<FighterQuery>> {
    let mut entries = vec![];
    for page in 0.. {
        let roster_page = get_roster_page(client, base_url, gender, page).await?;
        if roster_page.listed == 0 {
            break;
        }
        entries.extend(roster_page.entries);
    }
    Ok(entries)
}

/// One parsed listing page.
#[derive(Debug, Default)]
pub(crate) struct RosterPage {
    /// Listing entries on the page, named or not.
    pub(crate) listed: usize,
    pub(crate) entries: Vec<FighterQuery>,
}

/// Fetch and parse a single listing page.
#[instrument(skip(client))]
pub(crate) async fn get_roster_page(
    client: &reqwest::Client,
    base_url: &str,
    gender: Gender,
    page: u32,
) -> Result<RosterPage> {
    let url = build_url(
        base_url,
        "/athletes/all",
        &[
            ("filters[0]", ACTIVE_STATUS_FILTER.to_string()),
            ("gender", gender.roster_code().to_string()),
            ("page", page.to_string()),
        ],
    )?;
    let document = scraper::get_document(client, url.as_str()).await?;
    let roster_page = parse_roster_page(&document, gender)?;
    debug!(
        listed = roster_page.listed,
        parsed = roster_page.entries.len(),
        "parsed roster page"
    );
    Ok(roster_page)
}

/// Paging ends on a page with no listing entries at all, so nameless entries
/// are counted in `listed` even though they are skipped.
pub(crate) fn parse_roster_page(document: &scraper::Html, gender: Gender) -> Result<RosterPage> {
    let entry_selector = Selector::parse("div.c-listing-athlete__text")?;
    let mut roster_page = RosterPage::default();
    for entry in document.select(&entry_selector) {
        roster_page.listed += 1;
        if let Some(query) = parse_roster_entry(&entry, gender)? {
            roster_page.entries.push(query);
        }
    }
    Ok(roster_page)
}

fn parse_roster_entry(entry: &ElementRef, gender: Gender) -> Result<Option<FighterQuery>> {
    let name_selector = Selector::parse("span.c-listing-athlete__name")?;
    let Some(name) = select_text(entry, &name_selector) else {
        debug!("roster entry without a name");
        return Ok(None);
    };

    // Entries with several classification tags list the division second.
    let division_selector = Selector::parse("div.field__item")?;
    let divisions: Vec<String> = entry.select(&division_selector).map(|d| element_text(&d)).collect();
    let division = divisions
        .get(1)
        .or_else(|| divisions.first())
        .map(String::as_str)
        .unwrap_or(NOT_AVAILABLE);

    let nickname_selector = Selector::parse("span.c-listing-athlete__nickname div")?;
    let nickname = select_text(entry, &nickname_selector)
        .map(|n| n.trim_matches('"').trim().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Ok(Some(
        FighterQuery::new(&name, division, &nickname).with_gender(gender),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Vec<FighterQuery> {
        parse_roster_page(&scraper::Html::parse_document(html), Gender::Men)
            .unwrap()
            .entries
    }

    #[test]
    fn test_parse_entry_with_two_tags() {
        let entries = parse(
            r#"<div class="c-listing-athlete__text">
                 <span class="c-listing-athlete__nickname"><div>"Bones"
                 </div></span>
                 <span class="c-listing-athlete__name"> Jon Jones </span>
                 <span class="c-listing-athlete__title"><div class="field__item">Title Holder</div>
                   <div class="field__item">Heavyweight</div></span>
               </div>"#,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Jon Jones");
        assert_eq!(entries[0].nickname.as_deref(), Some("Bones"));
        assert_eq!(entries[0].weight_class, "Heavyweight");
        assert_eq!(entries[0].gender, Some(Gender::Men));
    }

    #[test]
    fn test_division_falls_back_to_first_tag_then_sentinel() {
        let entries = parse(
            r#"<div class="c-listing-athlete__text">
                 <span class="c-listing-athlete__name">Tim Means</span>
                 <span class="c-listing-athlete__title"><div class="field__item">Welterweight</div></span>
               </div>
               <div class="c-listing-athlete__text">
                 <span class="c-listing-athlete__name">New Signee</span>
               </div>"#,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].weight_class, "Welterweight");
        assert_eq!(entries[0].nickname, None);
        assert_eq!(entries[1].weight_class, NOT_AVAILABLE);
    }

    #[test]
    fn test_entry_without_name_is_skipped_but_listed() {
        let html = r#"<div class="c-listing-athlete__text"><span>?</span></div>
            <div class="c-listing-athlete__text"><span class="c-listing-athlete__name"> </span></div>"#;
        let page = parse_roster_page(&scraper::Html::parse_document(html), Gender::Women).unwrap();
        assert_eq!(page.listed, 2);
        assert!(page.entries.is_empty());
    }
}
