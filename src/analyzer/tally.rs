use crate::analyzer::ranking::{rank_ascending, rank_descending};
use crate::analyzer::rows_by_gameweek;
use crate::normalizer::LeagueTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of gameweeks a participant topped (or propped up) the weekly
/// net-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekTally {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub weeks: u32,
}

/// Weekly winners: rank 1 on net points (event points minus transfer cost),
/// highest first. Everyone tied at rank 1 wins that week.
pub fn best_player_tally(table: &LeagueTable) -> Vec<WeekTally> {
    weekly_tally(table, rank_descending)
}

/// Weekly losers: rank 1 on net points lowest first, ties included.
pub fn worst_player_tally(table: &LeagueTable) -> Vec<WeekTally> {
    weekly_tally(table, rank_ascending)
}

fn weekly_tally(table: &LeagueTable, rank: fn(&[i64]) -> Vec<u32>) -> Vec<WeekTally> {
    let mut counts: BTreeMap<u64, WeekTally> = BTreeMap::new();

    for week in rows_by_gameweek(table).into_values() {
        let net: Vec<i64> = week.iter().map(|r| r.net_points()).collect();
        for (row, r) in week.iter().zip(rank(&net)) {
            if r != 1 {
                continue;
            }
            counts
                .entry(row.entry_id)
                .or_insert_with(|| WeekTally {
                    entry_id: row.entry_id,
                    player_name: row.player_name.clone(),
                    entry_name: row.entry_name.clone(),
                    weeks: 0,
                })
                .weeks += 1;
        }
    }

    let mut out: Vec<WeekTally> = counts.into_values().collect();
    out.sort_by(|a, b| {
        b.weeks
            .cmp(&a.weeks)
            .then_with(|| a.entry_name.cmp(&b.entry_name))
            .then(a.entry_id.cmp(&b.entry_id))
    });
    out
}
