use crate::analyzer::bench::{
    BenchTotal, BenchWorstWeek, most_points_left_on_bench_week, total_points_left_on_bench,
};
use crate::analyzer::points::{
    CumulativePoints, ScoreGap, SeasonTotals, TransferHit, biggest_difference,
    points_by_gameweek, total_points_and_bench_points, transfer_hits,
};
use crate::analyzer::rank_history::{
    LastPlaceTally, RankEvent, most_frequent_last_rank, player_best_rank_event,
    player_worst_rank_event,
};
use crate::analyzer::tally::{WeekTally, best_player_tally, worst_player_tally};
use crate::model::ExcludedEntry;
use crate::normalizer::Normalized;
use serde::Serialize;
use tracing::info;

/// Every season report, computed from one canonical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonReport {
    pub latest_gameweek: Option<u32>,
    pub gameweeks: Vec<u32>,
    pub participant_count: usize,
    pub excluded: Vec<ExcludedEntry>,
    pub total_points_left_on_bench: Vec<BenchTotal>,
    pub most_points_left_on_bench_week: Vec<BenchWorstWeek>,
    pub biggest_difference: Option<ScoreGap>,
    pub points_by_gameweek: Vec<CumulativePoints>,
    pub total_points_and_bench_points: Vec<SeasonTotals>,
    pub player_best_rank_event: Vec<RankEvent>,
    pub player_worst_rank_event: Vec<RankEvent>,
    pub best_player_tally: Vec<WeekTally>,
    pub worst_player_tally: Vec<WeekTally>,
    pub transfer_hits: Vec<TransferHit>,
    pub most_frequent_last_rank: Vec<LastPlaceTally>,
}

/// Runs the whole report library over a normalized season.
pub struct SeasonAnalyzer;

impl SeasonAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, season: &Normalized) -> SeasonReport {
        let table = &season.table;
        info!(
            "Analyzing {} rows across {} gameweeks...",
            table.len(),
            table.gameweeks().len()
        );

        SeasonReport {
            latest_gameweek: table.latest_gameweek(),
            gameweeks: table.gameweeks(),
            participant_count: table.participant_count(),
            excluded: season.excluded.clone(),
            total_points_left_on_bench: total_points_left_on_bench(table),
            most_points_left_on_bench_week: most_points_left_on_bench_week(table),
            biggest_difference: biggest_difference(table),
            points_by_gameweek: points_by_gameweek(table),
            total_points_and_bench_points: total_points_and_bench_points(table),
            player_best_rank_event: player_best_rank_event(table),
            player_worst_rank_event: player_worst_rank_event(table),
            best_player_tally: best_player_tally(table),
            worst_player_tally: worst_player_tally(table),
            transfer_hits: transfer_hits(table),
            most_frequent_last_rank: most_frequent_last_rank(table),
        }
    }
}
