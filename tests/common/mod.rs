#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use league_wrapped::model::{
    FetchError, GameweekRecord, ParticipantRecord, Parsed, StandingEntry, StandingSnapshot,
};
use league_wrapped::scraper::LeagueSource;

pub fn standing(entry_id: u64, player_name: &str, league_rank: u64) -> StandingEntry {
    StandingEntry {
        snapshot: StandingSnapshot {
            entry_id,
            standing_id: entry_id * 10,
            league_rank,
            last_rank: league_rank,
            standings_total: 0,
            rank_sort: league_rank,
            event_total: 0,
        },
        participant: ParticipantRecord {
            entry_id,
            player_name: player_name.to_string(),
            entry_name: format!("{} FC", player_name),
        },
    }
}

pub fn week(entry_id: u64, gameweek: u32, points: i64) -> GameweekRecord {
    GameweekRecord {
        entry_id,
        gameweek,
        event_points: points,
        cumulative_points: 0,
        event_rank: Some(100_000),
        event_rank_sort: Some(100_000),
        overall_rank: 250_000,
        bank: 0,
        team_value: 1000,
        event_transfers: 1,
        event_transfers_cost: 0,
        points_on_bench: 0,
    }
}

/// Builds a history from weekly (points, bench, transfer cost) triples,
/// starting at gameweek 1, with source-style cumulative totals.
pub fn history(entry_id: u64, weeks: &[(i64, u32, u32)]) -> Vec<GameweekRecord> {
    let mut total = 0;
    weeks
        .iter()
        .enumerate()
        .map(|(i, &(points, bench, cost))| {
            total += points - i64::from(cost);
            GameweekRecord {
                cumulative_points: total,
                points_on_bench: bench,
                event_transfers_cost: cost,
                ..week(entry_id, i as u32 + 1, points)
            }
        })
        .collect()
}

/// In-memory scoring service.
#[derive(Default)]
pub struct StubSource {
    pub standings: Vec<StandingEntry>,
    pub histories: HashMap<u64, Result<Parsed<GameweekRecord>, FetchError>>,
    pub standings_error: Option<FetchError>,
    pub delay: Option<Duration>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl StubSource {
    pub fn new(standings: Vec<StandingEntry>) -> Self {
        Self {
            standings,
            ..Self::default()
        }
    }

    pub fn with_history(mut self, entry_id: u64, rows: Vec<GameweekRecord>) -> Self {
        self.histories.insert(
            entry_id,
            Ok(Parsed {
                rows,
                warnings: Vec::new(),
            }),
        );
        self
    }

    pub fn with_failure(mut self, entry_id: u64, error: FetchError) -> Self {
        self.histories.insert(entry_id, Err(error));
        self
    }
}

#[async_trait::async_trait]
impl LeagueSource for StubSource {
    async fn fetch_standings(&self, _league_id: u64) -> Result<Parsed<StandingEntry>, FetchError> {
        if let Some(e) = &self.standings_error {
            return Err(e.clone());
        }
        Ok(Parsed {
            rows: self.standings.clone(),
            warnings: Vec::new(),
        })
    }

    async fn fetch_history(&self, entry_id: u64) -> Result<Parsed<GameweekRecord>, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.histories
            .get(&entry_id)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}
