//! CSV and JSON output for fighter records and the roster, plus reading a
//! query list back from a roster CSV.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{
    Association, FightHistoryEntry, Fighter, FighterQuery, Gender, Roster, NOT_AVAILABLE,
};

pub const FIGHTER_CSV_HEADER: [&str; 9] = [
    "Fighter",
    "Opponent",
    "Result",
    "Event",
    "Event_date",
    "Method",
    "Referee",
    "Round",
    "Time",
];

pub const ROSTER_CSV_HEADER: [&str; 3] = ["Name", "Division", "Nickname"];

const CSV_DELIMITER: u8 = b';';

/// Character encoding of CSV output.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum CsvEncoding {
    /// ISO-8859-1. Rows with characters outside it are dropped.
    #[default]
    Latin1,
    Utf8,
}

impl CsvEncoding {
    fn encode(self, field: &str) -> Option<Vec<u8>> {
        match self {
            CsvEncoding::Utf8 => Some(field.as_bytes().to_vec()),
            CsvEncoding::Latin1 => field
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
        }
    }

    fn decode(self, field: &[u8]) -> Option<String> {
        match self {
            CsvEncoding::Utf8 => std::str::from_utf8(field).ok().map(str::to_string),
            CsvEncoding::Latin1 => Some(field.iter().copied().map(char::from).collect()),
        }
    }
}

/// Rows written and rows dropped for encoding reasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvSummary {
    pub written: usize,
    pub dropped: usize,
}

struct EncodedCsvWriter<W: Write> {
    inner: csv::Writer<W>,
    encoding: CsvEncoding,
    summary: CsvSummary,
}

impl<W: Write> EncodedCsvWriter<W> {
    fn new(writer: W, encoding: CsvEncoding, header: &[&str]) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .delimiter(CSV_DELIMITER)
            .from_writer(writer);
        inner.write_record(header)?;
        Ok(Self {
            inner,
            encoding,
            summary: CsvSummary::default(),
        })
    }

    /// Write one row, or drop it if any field cannot be encoded.
    fn write_row(&mut self, row: &[&str]) -> Result<()> {
        let encoded: Option<Vec<Vec<u8>>> = row.iter().map(|f| self.encoding.encode(f)).collect();
        match encoded {
            Some(fields) => {
                self.inner.write_record(&fields)?;
                self.summary.written += 1;
            }
            None => {
                warn!(
                    row = %row.join(";"),
                    encoding = %self.encoding,
                    "dropping row with characters outside the output encoding"
                );
                self.summary.dropped += 1;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<CsvSummary> {
        self.inner.flush()?;
        Ok(self.summary)
    }
}

/// Write one semicolon-delimited row per fight of every fighter.
pub fn write_fighters_csv<W: Write>(
    writer: W,
    fighters: &[Fighter],
    encoding: CsvEncoding,
) -> Result<CsvSummary> {
    let mut csv = EncodedCsvWriter::new(writer, encoding, &FIGHTER_CSV_HEADER)?;
    for fighter in fighters {
        for fight in fighter.fight_history() {
            csv.write_row(&[
                fighter.name.as_str(),
                fight.opponent.as_str(),
                fight.result.as_str(),
                fight.event.as_str(),
                fight.date.as_str(),
                fight.method.as_str(),
                fight.judge.as_str(),
                fight.round.as_str(),
                fight.time.as_str(),
            ])?;
        }
    }
    csv.finish()
}

/// Write the roster as `Name;Division;Nickname` rows, men first.
pub fn write_roster_csv<W: Write>(
    writer: W,
    roster: &Roster,
    encoding: CsvEncoding,
) -> Result<CsvSummary> {
    let mut csv = EncodedCsvWriter::new(writer, encoding, &ROSTER_CSV_HEADER)?;
    for entry in roster.men.iter().chain(&roster.women) {
        csv.write_row(&[
            entry.name.as_str(),
            entry.weight_class.as_str(),
            entry.nickname_or_na(),
        ])?;
    }
    csv.finish()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FighterDocument<'a> {
    name: &'a str,
    nick_name: Option<&'a str>,
    gender: Option<Gender>,
    birth_date: Option<NaiveDate>,
    height: Option<&'a str>,
    weight: Option<&'a str>,
    locality: Option<&'a str>,
    nationality: Option<&'a str>,
    weight_class: Option<&'a str>,
    wins: Option<u32>,
    losses: Option<u32>,
    draws: u32,
    no_contests: u32,
    associations: &'a [Association],
    fight_history_pro: Vec<FightHistoryEntry>,
}

impl<'a> From<&'a Fighter> for FighterDocument<'a> {
    fn from(fighter: &'a Fighter) -> Self {
        Self {
            name: &fighter.name,
            nick_name: fighter.nickname.as_deref(),
            gender: fighter.gender,
            birth_date: fighter.birth_date,
            height: fighter.height.as_deref(),
            weight: fighter.weight.as_deref(),
            locality: fighter.locality.as_deref(),
            nationality: fighter.nationality.as_deref(),
            weight_class: fighter.weight_class.as_deref(),
            wins: fighter.record.wins,
            losses: fighter.record.losses,
            draws: fighter.record.draws,
            no_contests: fighter.record.no_contests,
            associations: &fighter.associations,
            fight_history_pro: fighter.fight_history(),
        }
    }
}

/// A fight row in the name-keyed document, which carries no opponent URL.
#[derive(Serialize)]
struct KeyedFight {
    opponent: String,
    result: String,
    event: String,
    date: String,
    method: String,
    judge: String,
    round: String,
    time: String,
}

impl From<FightHistoryEntry> for KeyedFight {
    fn from(entry: FightHistoryEntry) -> Self {
        Self {
            opponent: entry.opponent,
            result: entry.result,
            event: entry.event,
            date: entry.date,
            method: entry.method,
            judge: entry.judge,
            round: entry.round,
            time: entry.time,
        }
    }
}

/// The full nested document `{"fighters": [...]}`.
pub fn fighters_document(fighters: &[Fighter]) -> Result<Value> {
    let documents: Vec<FighterDocument> = fighters.iter().map(FighterDocument::from).collect();
    let mut root = Map::new();
    root.insert("fighters".to_string(), serde_json::to_value(documents)?);
    Ok(Value::Object(root))
}

/// Write [`fighters_document`] as pretty-printed JSON.
pub fn write_fighters_json<W: Write>(writer: W, fighters: &[Fighter]) -> Result<()> {
    serde_json::to_writer_pretty(writer, &fighters_document(fighters)?)?;
    Ok(())
}

/// Merge `{name: [fights]}` entries for every fighter into the JSON object
/// stored at `path`. A missing or empty file starts from an empty object.
pub fn merge_fight_history_json(path: &Path, fighters: &[Fighter]) -> Result<()> {
    let mut document = match fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => map,
            other => {
                warn!(path = %path.display(), kind = ?other, "existing JSON is not an object; replacing it");
                Map::new()
            }
        },
        Ok(_) => Map::new(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(e) => return Err(e.into()),
    };

    for fighter in fighters {
        let fights: Vec<KeyedFight> = fighter
            .fight_history()
            .into_iter()
            .map(KeyedFight::from)
            .collect();
        document.insert(fighter.name.clone(), serde_json::to_value(fights)?);
    }

    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &Value::Object(document))?;
    debug!(path = %path.display(), fighters = fighters.len(), "merged fight history json");
    Ok(())
}

/// The roster as `{"men": [[name, division, nickname]], "women": [...]}`.
pub fn roster_document(roster: &Roster) -> Value {
    let rows = |entries: &[FighterQuery]| -> Value {
        entries
            .iter()
            .map(|q| {
                Value::Array(vec![
                    Value::from(q.name.as_str()),
                    Value::from(q.weight_class.as_str()),
                    Value::from(q.nickname_or_na()),
                ])
            })
            .collect()
    };
    let mut root = Map::new();
    root.insert("men".to_string(), rows(&roster.men));
    root.insert("women".to_string(), rows(&roster.women));
    Value::Object(root)
}

/// Write [`roster_document`] as pretty-printed JSON.
pub fn write_roster_json<W: Write>(writer: W, roster: &Roster) -> Result<()> {
    serde_json::to_writer_pretty(writer, &roster_document(roster))?;
    Ok(())
}

/// Read a query list from a roster-style CSV (header row, then name, division, nickname).
///
/// Fields are decoded with `encoding`, the encoding the file was written in.
/// Missing or blank division and nickname columns read as `"NA"`. A row that
/// cannot be decoded is skipped.
pub fn read_queries<R: Read>(
    reader: R,
    delimiter: u8,
    encoding: CsvEncoding,
) -> Result<Vec<FighterQuery>> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut queries = vec![];
    for record in csv.byte_records() {
        let record = record?;
        let fields: Option<Vec<String>> = record.iter().map(|f| encoding.decode(f)).collect();
        let Some(fields) = fields else {
            warn!(
                line = ?record.position().map(|p| p.line()),
                %encoding,
                "skipping row that is not valid in the input encoding"
            );
            continue;
        };
        let column = |i: usize| {
            fields
                .get(i)
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .unwrap_or(NOT_AVAILABLE)
        };
        let Some(name) = fields.first().map(|f| f.trim()).filter(|f| !f.is_empty()) else {
            continue;
        };
        queries.push(FighterQuery::new(name, column(1), column(2)));
    }
    Ok(queries)
}

/// [`read_queries`] from a file.
pub fn read_queries_csv(
    path: &Path,
    delimiter: u8,
    encoding: CsvEncoding,
) -> Result<Vec<FighterQuery>> {
    read_queries(fs::File::open(path)?, delimiter, encoding)
}
