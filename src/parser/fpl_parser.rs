// Fantasy Premier League response parsing
use crate::model::{
    DataWarning, FetchError, GameweekRecord, ParticipantRecord, Parsed, StandingEntry,
    StandingSnapshot,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw `standings.results[]` item.
#[derive(Debug, Deserialize)]
struct RawStandingRow {
    id: u64,
    event_total: i64,
    player_name: String,
    rank: u64,
    last_rank: u64,
    rank_sort: u64,
    total: i64,
    entry: u64,
    entry_name: String,
}

/// Raw `current[]` item of an entry history.
#[derive(Debug, Deserialize)]
struct RawHistoryRow {
    event: u32,
    points: i64,
    total_points: i64,
    rank: Option<u64>,
    rank_sort: Option<u64>,
    overall_rank: u64,
    bank: i64,
    value: i64,
    event_transfers: u32,
    event_transfers_cost: u32,
    points_on_bench: u32,
}

/// One page of league standings.
#[derive(Debug, Clone)]
pub struct StandingsPage {
    pub entries: Parsed<StandingEntry>,
    pub has_next: bool,
}

pub struct FplParser;

impl FplParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a `leagues-classic/{id}/standings/` body.
    pub fn parse_standings(&self, body: &str) -> Result<StandingsPage, FetchError> {
        let json: Value =
            serde_json::from_str(body).map_err(|e| FetchError::Format(e.to_string()))?;
        let standings = json
            .get("standings")
            .ok_or_else(|| FetchError::Format("missing `standings` object".into()))?;
        let results = array_at(standings, "results")?;
        let has_next = standings
            .get("has_next")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let raw: Parsed<(usize, RawStandingRow)> = decode_rows(results, "standings");
        let rows = raw
            .rows
            .into_iter()
            .map(|(_, r)| StandingEntry {
                snapshot: StandingSnapshot {
                    entry_id: r.entry,
                    standing_id: r.id,
                    league_rank: r.rank,
                    last_rank: r.last_rank,
                    standings_total: r.total,
                    rank_sort: r.rank_sort,
                    event_total: r.event_total,
                },
                participant: ParticipantRecord {
                    entry_id: r.entry,
                    player_name: r.player_name,
                    entry_name: r.entry_name,
                },
            })
            .collect();

        Ok(StandingsPage {
            entries: Parsed {
                rows,
                warnings: raw.warnings,
            },
            has_next,
        })
    }

    /// Parses an `entry/{id}/history/` body. The entry id is not part of the
    /// body, so the caller binds it.
    pub fn parse_history(
        &self,
        entry_id: u64,
        body: &str,
    ) -> Result<Parsed<GameweekRecord>, FetchError> {
        let json: Value =
            serde_json::from_str(body).map_err(|e| FetchError::Format(e.to_string()))?;
        let current = array_at(&json, "current")?;
        let source = format!("history/{}", entry_id);

        let raw: Parsed<(usize, RawHistoryRow)> = decode_rows(current, &source);
        let mut warnings = raw.warnings;
        let mut rows = Vec::with_capacity(raw.rows.len());
        for (index, r) in raw.rows {
            if r.event == 0 {
                warnings.push(DataWarning {
                    source: source.clone(),
                    index,
                    reason: "gameweek must be positive".into(),
                });
                continue;
            }
            rows.push(GameweekRecord {
                entry_id,
                gameweek: r.event,
                event_points: r.points,
                cumulative_points: r.total_points,
                event_rank: r.rank,
                event_rank_sort: r.rank_sort,
                overall_rank: r.overall_rank,
                bank: r.bank,
                team_value: r.value,
                event_transfers: r.event_transfers,
                event_transfers_cost: r.event_transfers_cost,
                points_on_bench: r.points_on_bench,
            });
        }

        Ok(Parsed { rows, warnings })
    }
}

fn array_at<'a>(value: &'a Value, key: &str) -> Result<&'a Vec<Value>, FetchError> {
    value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Format(format!("missing `{}` array", key)))
}

/// Decodes each element independently, keeping its position in the body.
/// Rows that fail are reported, not fatal.
fn decode_rows<T: DeserializeOwned>(items: &[Value], source: &str) -> Parsed<(usize, T)> {
    let mut parsed = Parsed::default();
    for (index, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(row) => parsed.rows.push((index, row)),
            Err(e) => parsed.warnings.push(DataWarning {
                source: source.to_string(),
                index,
                reason: e.to_string(),
            }),
        }
    }
    parsed
}
