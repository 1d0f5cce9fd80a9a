use crate::analyzer::points::{CumulativePoints, running_totals};
use crate::analyzer::ranking::rank_descending;
use crate::normalizer::LeagueTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// A participant's place in the league table after one gameweek, ranked on
/// the running total of raw weekly points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPosition {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub gameweek: u32,
    pub points: i64,
    pub rank: u32,
}

/// A participant's best or worst league position and every gameweek it held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEvent {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub rank: u32,
    pub gameweeks: Vec<u32>,
    /// `gameweeks` joined with ", ".
    pub events: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastPlaceTally {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub times_last_rank: u32,
}

pub fn weekly_positions(table: &LeagueTable) -> Vec<WeeklyPosition> {
    let mut by_week: BTreeMap<u32, Vec<CumulativePoints>> = BTreeMap::new();
    for total in running_totals(table) {
        by_week.entry(total.gameweek).or_default().push(total);
    }

    let mut out = Vec::with_capacity(table.len());
    for week in by_week.into_values() {
        let points: Vec<i64> = week.iter().map(|c| c.points).collect();
        let ranks = rank_descending(&points);
        for (c, rank) in week.into_iter().zip(ranks) {
            out.push(WeeklyPosition {
                entry_id: c.entry_id,
                player_name: c.player_name,
                entry_name: c.entry_name,
                gameweek: c.gameweek,
                points: c.points,
                rank,
            });
        }
    }
    out
}

fn positions_by_entry(table: &LeagueTable) -> BTreeMap<u64, Vec<WeeklyPosition>> {
    let mut map: BTreeMap<u64, Vec<WeeklyPosition>> = BTreeMap::new();
    for p in weekly_positions(table) {
        map.entry(p.entry_id).or_default().push(p);
    }
    map
}

fn extreme_rank_events(table: &LeagueTable, pick_best: bool) -> Vec<RankEvent> {
    let mut out = Vec::new();
    for (entry_id, positions) in positions_by_entry(table) {
        let extreme = if pick_best {
            positions.iter().map(|p| p.rank).min()
        } else {
            positions.iter().map(|p| p.rank).max()
        };
        let Some(rank) = extreme else { continue };

        let mut gameweeks: Vec<u32> = positions
            .iter()
            .filter(|p| p.rank == rank)
            .map(|p| p.gameweek)
            .collect();
        gameweeks.sort_unstable();
        gameweeks.dedup();

        out.push(RankEvent {
            entry_id,
            player_name: positions[0].player_name.clone(),
            entry_name: positions[0].entry_name.clone(),
            rank,
            events: join_gameweeks(&gameweeks),
            gameweeks,
        });
    }
    out
}

/// Best league position each participant reached, by entry name.
pub fn player_best_rank_event(table: &LeagueTable) -> Vec<RankEvent> {
    let mut out = extreme_rank_events(table, true);
    out.sort_by(|a, b| a.entry_name.cmp(&b.entry_name).then(a.entry_id.cmp(&b.entry_id)));
    out
}

/// Worst league position each participant fell to, by player name.
pub fn player_worst_rank_event(table: &LeagueTable) -> Vec<RankEvent> {
    let mut out = extreme_rank_events(table, false);
    out.sort_by(|a, b| a.player_name.cmp(&b.player_name).then(a.entry_id.cmp(&b.entry_id)));
    out
}

/// How often each participant sat at the bottom of the league table after a
/// gameweek. Participants who were never last are left out.
pub fn most_frequent_last_rank(table: &LeagueTable) -> Vec<LastPlaceTally> {
    let mut by_week: BTreeMap<u32, Vec<WeeklyPosition>> = BTreeMap::new();
    for p in weekly_positions(table) {
        by_week.entry(p.gameweek).or_default().push(p);
    }

    let mut counts: BTreeMap<u64, LastPlaceTally> = BTreeMap::new();
    for week in by_week.values() {
        let Some(last) = week.iter().map(|p| p.rank).max() else {
            continue;
        };
        for p in week.iter().filter(|p| p.rank == last) {
            counts
                .entry(p.entry_id)
                .or_insert_with(|| LastPlaceTally {
                    entry_id: p.entry_id,
                    player_name: p.player_name.clone(),
                    entry_name: p.entry_name.clone(),
                    times_last_rank: 0,
                })
                .times_last_rank += 1;
        }
    }

    let mut out: Vec<LastPlaceTally> = counts.into_values().collect();
    out.sort_by(|a, b| {
        b.times_last_rank
            .cmp(&a.times_last_rank)
            .then_with(|| a.entry_name.cmp(&b.entry_name))
            .then(a.entry_id.cmp(&b.entry_id))
    });
    out
}

fn join_gameweeks(gameweeks: &[u32]) -> String {
    gameweeks
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::fixtures::row;

    // A leads after week 1, B overtakes in week 2, C is level with A in week 3.
    fn season() -> LeagueTable {
        LeagueTable::new(vec![
            row(1, "A", 1, 60),
            row(2, "B", 1, 50),
            row(3, "C", 1, 40),
            row(1, "A", 2, 30),
            row(2, "B", 2, 70),
            row(3, "C", 2, 45),
            row(1, "A", 3, 40),
            row(2, "B", 3, 30),
            row(3, "C", 3, 45),
        ])
    }

    fn position(positions: &[WeeklyPosition], entry_id: u64, gameweek: u32) -> u32 {
        positions
            .iter()
            .find(|p| p.entry_id == entry_id && p.gameweek == gameweek)
            .map(|p| p.rank)
            .unwrap()
    }

    #[test]
    fn positions_rank_running_totals_with_shared_ties() {
        // Totals: wk1 A60 B50 C40, wk2 A90 B120 C85, wk3 A130 B150 C130.
        let positions = weekly_positions(&season());
        assert_eq!(position(&positions, 1, 1), 1);
        assert_eq!(position(&positions, 2, 2), 1);
        assert_eq!(position(&positions, 1, 3), 2);
        assert_eq!(position(&positions, 3, 3), 2);
    }

    #[test]
    fn best_rank_lists_every_week_it_was_held() {
        let best = player_best_rank_event(&season());
        let b = best.iter().find(|e| e.entry_id == 2).unwrap();
        assert_eq!(b.rank, 1);
        assert_eq!(b.gameweeks, vec![2, 3]);
        assert_eq!(b.events, "2, 3");
        let names: Vec<&str> = best.iter().map(|e| e.entry_name.as_str()).collect();
        assert_eq!(names, vec!["A XI", "B XI", "C XI"]);
    }

    #[test]
    fn worst_rank_is_never_better_than_best() {
        let table = season();
        let best = player_best_rank_event(&table);
        let worst = player_worst_rank_event(&table);
        for w in &worst {
            let b = best.iter().find(|b| b.entry_id == w.entry_id).unwrap();
            assert!(b.rank <= w.rank);
        }
        let c = worst.iter().find(|e| e.entry_id == 3).unwrap();
        assert_eq!((c.rank, c.events.as_str()), (3, "1, 2"));
    }

    #[test]
    fn last_place_counts_ties() {
        let tally = most_frequent_last_rank(&season());
        // C is last in weeks 1 and 2; A and C share last place in week 3.
        assert_eq!(tally.len(), 2);
        assert_eq!(tally[0].entry_id, 3);
        assert_eq!(tally[0].times_last_rank, 3);
        assert_eq!(tally[1].entry_id, 1);
        assert_eq!(tally[1].times_last_rank, 1);
    }

    #[test]
    fn empty_table_has_no_rank_history() {
        let table = LeagueTable::default();
        assert!(weekly_positions(&table).is_empty());
        assert!(player_best_rank_event(&table).is_empty());
        assert!(player_worst_rank_event(&table).is_empty());
        assert!(most_frequent_last_rank(&table).is_empty());
    }
}
