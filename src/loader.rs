use crate::model::{DataWarning, FetchError, HistoryOutcome, StandingEntry};
use crate::scraper::LeagueSource;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{info, warn};

/// Everything fetched for one league in one session.
#[derive(Debug, Clone)]
pub struct LeagueLoad {
    pub league_id: u64,
    pub standings: Vec<StandingEntry>,
    pub histories: Vec<HistoryOutcome>,
    pub warnings: Vec<DataWarning>,
    pub fetched_at: DateTime<Utc>,
}

impl LeagueLoad {
    pub fn failed_entries(&self) -> impl Iterator<Item = u64> + '_ {
        self.histories.iter().filter_map(|h| match h {
            HistoryOutcome::Failed { entry_id, .. } => Some(*entry_id),
            HistoryOutcome::Loaded { .. } => None,
        })
    }
}

/// Fetches the standings, then every entry history with at most
/// `max_concurrent` requests in flight. Returns only once every history has
/// either loaded or failed. A failed history does not fail the load; a failed
/// standings request does.
pub async fn load_league<S>(
    source: &S,
    league_id: u64,
    max_concurrent: usize,
) -> Result<LeagueLoad, FetchError>
where
    S: LeagueSource + ?Sized,
{
    info!("Fetching standings for league {}...", league_id);
    let standings = source.fetch_standings(league_id).await?;
    let mut warnings = standings.warnings;
    info!("League {} has {} entries", league_id, standings.rows.len());

    let mut seen = HashSet::new();
    let entry_ids: Vec<u64> = standings
        .rows
        .iter()
        .map(StandingEntry::entry_id)
        .filter(|id| seen.insert(*id))
        .collect();

    let mut fetched: Vec<(HistoryOutcome, Vec<DataWarning>)> = stream::iter(entry_ids)
        .map(|entry_id| async move {
            match source.fetch_history(entry_id).await {
                Ok(parsed) => (
                    HistoryOutcome::Loaded {
                        entry_id,
                        rows: parsed.rows,
                    },
                    parsed.warnings,
                ),
                Err(error) => {
                    warn!("History fetch failed for entry {}: {}", entry_id, error);
                    (HistoryOutcome::Failed { entry_id, error }, Vec::new())
                }
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;
    fetched.sort_by_key(|(outcome, _)| outcome.entry_id());

    let mut histories = Vec::with_capacity(fetched.len());
    for (outcome, row_warnings) in fetched {
        warnings.extend(row_warnings);
        histories.push(outcome);
    }

    for w in &warnings {
        warn!("Dropped source row: {}", w);
    }

    Ok(LeagueLoad {
        league_id,
        standings: standings.rows,
        histories,
        warnings,
        fetched_at: Utc::now(),
    })
}
