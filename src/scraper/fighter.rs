use ::scraper::{ElementRef, Selector};
use chrono::NaiveDate;
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::{Association, FightColumns, FightRecord, Fighter};
use crate::scraper::{self, build_url, element_text, select_text, text_nodes};

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";
const PRO_HISTORY_TITLE: &str = "Fight History - Pro";

/// Each fight-history row spans six `<td>` cells, after a six-cell header row.
const CELLS_PER_ROW: usize = 6;
const METHOD_CELL_OFFSET: usize = 9;
const ROUND_CELL_OFFSET: usize = 10;
const TIME_CELL_OFFSET: usize = 11;

/// Fetch a profile page and build the fighter record from it.
///
/// Returns `Ok(None)` when the page carries no fighter name.
#[instrument(skip(client))]
pub(crate) async fn get_fighter(client: &reqwest::Client, url: &str) -> Result<Option<Fighter>> {
    let document = scraper::get_document(client, url).await?;
    let fighter = parse_fighter(&document, url)?;
    match &fighter {
        Some(f) => debug!(
            name = %f.name,
            fights = f.fights.opponents.len(),
            validated = f.validated,
            "parsed fighter profile"
        ),
        None => debug!("profile page has no fighter name"),
    }
    Ok(fighter)
}

/// Fetch the profile page for a numeric Sherdog fighter id.
#[instrument(skip(client))]
pub(crate) async fn get_fighter_by_index(
    client: &reqwest::Client,
    base_url: &str,
    index: u64,
) -> Result<Option<Fighter>> {
    let url = build_url(base_url, "/fighter/index", &[("id", index.to_string())])?;
    get_fighter(client, url.as_str()).await
}

/// Build a fighter record from a profile document.
///
/// Every field other than the name is extracted independently; a field that
/// cannot be found is left empty and logged.
pub(crate) fn parse_fighter(document: &scraper::Html, url: &str) -> Result<Option<Fighter>> {
    let root = document.root_element();

    let Some(name) = select_text(&root, &Selector::parse("span.fn")?) else {
        return Ok(None);
    };

    let nickname = field(&root, "span.nickname", "nickname", &name)?;
    let birth_date = field(&root, "span[itemprop=birthDate]", "birth date", &name)?
        .and_then(|text| match NaiveDate::parse_from_str(&text, BIRTH_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!(fighter = %name, text = %text, error = %e, "unparsable birth date");
                None
            }
        });
    let height = field(&root, "strong[itemprop=height]", "height", &name)?;
    let weight = field(&root, "strong[itemprop=weight]", "weight", &name)?;
    let locality = field(&root, "span.locality", "locality", &name)?;
    let nationality = field(&root, "strong[itemprop=nationality]", "nationality", &name)?;
    let weight_class = field(&root, "strong.title", "weight class", &name)?;
    let record = parse_record(&root, &name)?;
    let associations = parse_associations(&root, &name)?;

    let fights = match pro_history_section(&root)? {
        Some(section) => parse_fight_columns(&section)?,
        None => {
            debug!(fighter = %name, "no professional fight history on page");
            FightColumns::default()
        }
    };

    let validated = fights.is_consistent();
    if !validated {
        warn!(
            fighter = %name,
            opponents = fights.opponents.len(),
            results = fights.results.len(),
            methods = fights.methods.len(),
            "fight history columns disagree in length"
        );
    }

    Ok(Some(Fighter {
        url: url.to_string(),
        name,
        nickname,
        gender: None,
        birth_date,
        height,
        weight,
        locality,
        nationality,
        weight_class,
        record,
        associations,
        fights,
        validated,
    }))
}

fn field(
    root: &ElementRef,
    selector: &str,
    field: &'static str,
    fighter: &str,
) -> Result<Option<String>> {
    let value = select_text(root, &Selector::parse(selector)?);
    if value.is_none() {
        debug!(fighter, field, "field missing from profile");
    }
    Ok(value)
}

/// Wins and losses are always shown; draws and no-contests only when non-zero.
fn parse_record(root: &ElementRef, fighter: &str) -> Result<FightRecord> {
    let counter_selector = Selector::parse("span.counter")?;
    let counters = root
        .select(&counter_selector)
        .map(|c| element_text(&c).parse::<u32>().ok())
        .collect_vec();
    if counters.len() < 2 {
        debug!(fighter, found = counters.len(), "record counters missing from profile");
    }
    let counter = |i: usize| counters.get(i).copied().flatten();
    Ok(FightRecord {
        wins: counter(0),
        losses: counter(1),
        draws: counter(2).unwrap_or(0),
        no_contests: counter(3).unwrap_or(0),
    })
}

fn parse_associations(root: &ElementRef, fighter: &str) -> Result<Vec<Association>> {
    let association_selector = Selector::parse("a.association")?;
    let name_selector = Selector::parse("span[itemprop=name]")?;
    Ok(root
        .select(&association_selector)
        .filter_map(|a| {
            let Some(name) = select_text(&a, &name_selector) else {
                debug!(fighter, "association without a gym name");
                return None;
            };
            let url = a.value().attr("href").unwrap_or_default().trim().to_string();
            Some(Association { name, url })
        })
        .collect())
}

/// The fight history module headed "Fight History - Pro", if any.
fn pro_history_section<'a>(root: &ElementRef<'a>) -> Result<Option<ElementRef<'a>>> {
    let module_selector = Selector::parse("div.module.fight_history")?;
    let heading_selector = Selector::parse("h2")?;
    Ok(root.select(&module_selector).find(|module| {
        module
            .select(&heading_selector)
            .next()
            .is_some_and(|h2| element_text(&h2) == PRO_HISTORY_TITLE)
    }))
}

/// Slice the pro fight history into parallel columns.
///
/// Links alternate opponent/event, `sub_line` spans alternate date/referee,
/// and the method, round and time sit at fixed offsets of the six-cell rows.
pub(crate) fn parse_fight_columns(section: &ElementRef) -> Result<FightColumns> {
    let result_selector = Selector::parse("span.final_result")?;
    let link_selector = Selector::parse("a")?;
    let sub_line_selector = Selector::parse("span.sub_line")?;
    let cell_selector = Selector::parse("td")?;

    let results = section
        .select(&result_selector)
        .map(|r| element_text(&r))
        .collect_vec();

    let links = section.select(&link_selector).collect_vec();
    let opponents = links.iter().step_by(2).map(element_text).collect_vec();
    let opponent_urls = links
        .iter()
        .step_by(2)
        .map(|a| a.value().attr("href").unwrap_or_default().trim().to_string())
        .collect_vec();
    let events = links.iter().skip(1).step_by(2).map(element_text).collect_vec();

    let sub_lines = section.select(&sub_line_selector).collect_vec();
    let event_dates = sub_lines.iter().step_by(2).map(element_text).collect_vec();
    let judges = sub_lines.iter().skip(1).step_by(2).map(element_text).collect_vec();

    let cells = section.select(&cell_selector).collect_vec();
    // A method cell holds "method, referee"; keep every other text node.
    let methods = cells
        .iter()
        .skip(METHOD_CELL_OFFSET)
        .step_by(CELLS_PER_ROW)
        .flat_map(|td| text_nodes(td).step_by(2).map(str::to_string))
        .collect_vec();
    let rounds = cells
        .iter()
        .skip(ROUND_CELL_OFFSET)
        .step_by(CELLS_PER_ROW)
        .map(element_text)
        .collect_vec();
    let times = cells
        .iter()
        .skip(TIME_CELL_OFFSET)
        .step_by(CELLS_PER_ROW)
        .map(element_text)
        .collect_vec();

    Ok(FightColumns {
        results,
        opponents,
        opponent_urls,
        events,
        event_dates,
        methods,
        judges,
        rounds,
        times,
    })
}
