use crate::analyzer::rows_by_entry;
use crate::normalizer::LeagueTable;
use serde::Serialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchTotal {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub total_points_on_bench: i64,
}

/// A gameweek in which a participant left their season-high on the bench.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchWorstWeek {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub most_points_left_on_bench: u32,
    pub gameweek: u32,
}

/// Points left on the bench over the season, highest first.
pub fn total_points_left_on_bench(table: &LeagueTable) -> Vec<BenchTotal> {
    let mut out: Vec<BenchTotal> = rows_by_entry(table)
        .into_iter()
        .map(|(entry_id, rows)| BenchTotal {
            entry_id,
            player_name: rows[0].player_name.clone(),
            entry_name: rows[0].entry_name.clone(),
            total_points_on_bench: rows.iter().map(|r| i64::from(r.points_on_bench)).sum(),
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_points_on_bench
            .cmp(&a.total_points_on_bench)
            .then_with(|| a.entry_name.cmp(&b.entry_name))
            .then(a.entry_id.cmp(&b.entry_id))
    });
    out
}

/// Each participant's worst single bench week. Every gameweek that hit the
/// maximum is listed as its own row.
pub fn most_points_left_on_bench_week(table: &LeagueTable) -> Vec<BenchWorstWeek> {
    let mut out = Vec::new();
    for (entry_id, rows) in rows_by_entry(table) {
        let Some(max) = rows.iter().map(|r| r.points_on_bench).max() else {
            continue;
        };
        for row in rows.iter().filter(|r| r.points_on_bench == max) {
            out.push(BenchWorstWeek {
                entry_id,
                player_name: row.player_name.clone(),
                entry_name: row.entry_name.clone(),
                most_points_left_on_bench: max,
                gameweek: row.gameweek,
            });
        }
    }
    out.sort_by_key(|w| {
        (
            Reverse(w.most_points_left_on_bench),
            w.entry_name.clone(),
            w.entry_id,
            w.gameweek,
        )
    });
    out
}
