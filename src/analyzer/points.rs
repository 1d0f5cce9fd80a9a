use crate::analyzer::{rows_by_entry, rows_by_gameweek};
use crate::model::CanonicalRow;
use crate::normalizer::LeagueTable;
use serde::Serialize;
use std::cmp::Reverse;

/// A participant's running points total as of one gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativePoints {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub gameweek: u32,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonTotals {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub total_points: i64,
    pub bench_points: i64,
}

/// The widest single-week score difference between two participants.
/// `player1` is the participant sorting first by (player name, entry id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreGap {
    pub gameweek: u32,
    pub player1: String,
    pub entry1: String,
    pub points1: i64,
    pub player2: String,
    pub entry2: String,
    pub points2: i64,
    pub difference: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferHit {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub gameweek: u32,
    pub event_transfers: u32,
    pub event_transfers_cost: u32,
    pub event_points: i64,
}

/// Inclusive prefix sums of raw weekly points, per participant in gameweek
/// order. Rows sharing a gameweek share the total through all of them.
pub(crate) fn running_totals(table: &LeagueTable) -> Vec<CumulativePoints> {
    let mut out = Vec::with_capacity(table.len());
    for (entry_id, mut rows) in rows_by_entry(table) {
        rows.sort_by_key(|r| r.gameweek);
        let mut total = 0i64;
        for peers in rows.chunk_by(|a, b| a.gameweek == b.gameweek) {
            total += peers.iter().map(|r| r.event_points).sum::<i64>();
            for row in peers {
                out.push(CumulativePoints {
                    entry_id,
                    player_name: row.player_name.clone(),
                    entry_name: row.entry_name.clone(),
                    gameweek: row.gameweek,
                    points: total,
                });
            }
        }
    }
    out
}

/// Running points per participant, ascending by gameweek.
pub fn points_by_gameweek(table: &LeagueTable) -> Vec<CumulativePoints> {
    let mut out = running_totals(table);
    out.sort_by(|a, b| {
        a.gameweek
            .cmp(&b.gameweek)
            .then_with(|| a.entry_name.cmp(&b.entry_name))
            .then(a.entry_id.cmp(&b.entry_id))
    });
    out
}

/// Season points and bench points per participant, by entry name.
pub fn total_points_and_bench_points(table: &LeagueTable) -> Vec<SeasonTotals> {
    let mut out: Vec<SeasonTotals> = rows_by_entry(table)
        .into_iter()
        .map(|(entry_id, rows)| SeasonTotals {
            entry_id,
            player_name: rows[0].player_name.clone(),
            entry_name: rows[0].entry_name.clone(),
            total_points: rows.iter().map(|r| r.event_points).sum(),
            bench_points: rows.iter().map(|r| i64::from(r.points_on_bench)).sum(),
        })
        .collect();
    out.sort_by(|a, b| a.entry_name.cmp(&b.entry_name).then(a.entry_id.cmp(&b.entry_id)));
    out
}

/// Largest |points_a - points_b| over all pairs of distinct participants in
/// the same gameweek. Ties go to the earliest gameweek, then to the pair that
/// sorts first by (player name, entry id).
pub fn biggest_difference(table: &LeagueTable) -> Option<ScoreGap> {
    let mut best: Option<GapCandidate> = None;

    for (gameweek, rows) in rows_by_gameweek(table) {
        for (i, a) in rows.iter().enumerate() {
            for b in &rows[i + 1..] {
                if a.entry_id == b.entry_id {
                    continue;
                }
                let (first, second) = if participant_key(a) <= participant_key(b) {
                    (*a, *b)
                } else {
                    (*b, *a)
                };
                let candidate = GapCandidate {
                    gameweek,
                    difference: (a.event_points - b.event_points).abs(),
                    first,
                    second,
                };
                if best.as_ref().is_none_or(|current| candidate.key() < current.key()) {
                    best = Some(candidate);
                }
            }
        }
    }

    best.map(|c| ScoreGap {
        gameweek: c.gameweek,
        player1: c.first.player_name.clone(),
        entry1: c.first.entry_name.clone(),
        points1: c.first.event_points,
        player2: c.second.player_name.clone(),
        entry2: c.second.entry_name.clone(),
        points2: c.second.event_points,
        difference: c.difference,
    })
}

struct GapCandidate<'a> {
    gameweek: u32,
    difference: i64,
    first: &'a CanonicalRow,
    second: &'a CanonicalRow,
}

impl GapCandidate<'_> {
    /// Smaller is better.
    fn key(&self) -> (Reverse<i64>, u32, (&str, u64), (&str, u64)) {
        (
            Reverse(self.difference),
            self.gameweek,
            participant_key(self.first),
            participant_key(self.second),
        )
    }
}

fn participant_key(row: &CanonicalRow) -> (&str, u64) {
    (row.player_name.as_str(), row.entry_id)
}

/// Every week in which a participant paid points for extra transfers.
pub fn transfer_hits(table: &LeagueTable) -> Vec<TransferHit> {
    let mut out: Vec<TransferHit> = table
        .rows()
        .iter()
        .filter(|r| r.event_transfers_cost > 0)
        .map(|r| TransferHit {
            entry_id: r.entry_id,
            player_name: r.player_name.clone(),
            entry_name: r.entry_name.clone(),
            gameweek: r.gameweek,
            event_transfers: r.event_transfers,
            event_transfers_cost: r.event_transfers_cost,
            event_points: r.event_points,
        })
        .collect();
    out.sort_by(|a, b| {
        a.gameweek
            .cmp(&b.gameweek)
            .then_with(|| a.entry_name.cmp(&b.entry_name))
            .then(a.entry_id.cmp(&b.entry_id))
    });
    out
}
