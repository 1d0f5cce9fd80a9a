// Analyzer module: season reports over the canonical table.
//
// Every report is a pure function of the table. Participants are told apart by
// entry id, and every sort carries enough secondary keys to make the output
// independent of table row order.

pub mod bench;
pub mod points;
pub mod rank_history;
pub mod ranking;
pub mod season;
pub mod tally;

pub use season::{SeasonAnalyzer, SeasonReport};

use crate::model::CanonicalRow;
use crate::normalizer::LeagueTable;
use std::collections::BTreeMap;

/// Rows of each participant, keyed by entry id.
pub(crate) fn rows_by_entry(table: &LeagueTable) -> BTreeMap<u64, Vec<&CanonicalRow>> {
    let mut map: BTreeMap<u64, Vec<&CanonicalRow>> = BTreeMap::new();
    for row in table.rows() {
        map.entry(row.entry_id).or_default().push(row);
    }
    map
}

/// Rows of each gameweek, ascending.
pub(crate) fn rows_by_gameweek(table: &LeagueTable) -> BTreeMap<u32, Vec<&CanonicalRow>> {
    let mut map: BTreeMap<u32, Vec<&CanonicalRow>> = BTreeMap::new();
    for row in table.rows() {
        map.entry(row.gameweek).or_default().push(row);
    }
    map
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::CanonicalRow;

    /// A row for participant `name` with no bench points or transfer costs.
    pub fn row(entry_id: u64, name: &str, gameweek: u32, points: i64) -> CanonicalRow {
        CanonicalRow {
            entry_id,
            player_name: name.to_string(),
            entry_name: format!("{} XI", name),
            gameweek,
            event_points: points,
            cumulative_points: 0,
            event_rank: None,
            event_rank_sort: None,
            overall_rank: 1,
            bank: 0,
            team_value: 1000,
            event_transfers: 0,
            event_transfers_cost: 0,
            points_on_bench: 0,
            league_rank: 1,
            last_rank: 1,
            standings_total: 0,
            rank_sort: 1,
        }
    }

    pub fn bench_row(entry_id: u64, name: &str, gameweek: u32, bench: u32) -> CanonicalRow {
        CanonicalRow {
            points_on_bench: bench,
            ..row(entry_id, name, gameweek, 50)
        }
    }

    pub fn hit_row(entry_id: u64, name: &str, gameweek: u32, points: i64, cost: u32) -> CanonicalRow {
        CanonicalRow {
            event_transfers: cost / 4 + 1,
            event_transfers_cost: cost,
            ..row(entry_id, name, gameweek, points)
        }
    }
}
