use crate::loader::LeagueLoad;
use crate::model::{
    CanonicalRow, DataWarning, ExcludedEntry, ExclusionReason, GameweekRecord, HistoryOutcome,
    StandingEntry,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{info, warn};

/// The canonical league-season table. Built once, never mutated afterwards.
/// Row order carries no meaning.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeagueTable {
    rows: Vec<CanonicalRow>,
}

impl LeagueTable {
    pub fn new(rows: Vec<CanonicalRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct gameweeks present, ascending.
    pub fn gameweeks(&self) -> Vec<u32> {
        self.rows
            .iter()
            .map(|r| r.gameweek)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Most recent gameweek with data.
    pub fn latest_gameweek(&self) -> Option<u32> {
        self.rows.iter().map(|r| r.gameweek).max()
    }

    pub fn entry_ids(&self) -> BTreeSet<u64> {
        self.rows.iter().map(|r| r.entry_id).collect()
    }

    pub fn participant_count(&self) -> usize {
        self.entry_ids().len()
    }
}

/// Canonical table plus an account of what did not make it in.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub table: LeagueTable,
    pub excluded: Vec<ExcludedEntry>,
    pub warnings: Vec<DataWarning>,
}

pub fn normalize_load(load: &LeagueLoad) -> Normalized {
    normalize(&load.standings, &load.histories)
}

/// Inner-joins every gameweek record with its entry's standing. Records of
/// entries without a standing are dropped and reported in `excluded`, as are
/// entries whose history could not be fetched.
pub fn normalize(standings: &[StandingEntry], histories: &[HistoryOutcome]) -> Normalized {
    let mut out = Normalized::default();

    let mut by_entry: HashMap<u64, &StandingEntry> = HashMap::new();
    for (index, standing) in standings.iter().enumerate() {
        if by_entry.contains_key(&standing.entry_id()) {
            out.warnings.push(DataWarning {
                source: "standings".into(),
                index,
                reason: format!("duplicate standing for entry {}", standing.entry_id()),
            });
            continue;
        }
        by_entry.insert(standing.entry_id(), standing);
    }

    let mut rows = Vec::new();
    let mut contributed: HashSet<u64> = HashSet::new();
    let mut reported: HashSet<u64> = HashSet::new();

    for outcome in histories {
        match outcome {
            HistoryOutcome::Failed { entry_id, error } => {
                if reported.insert(*entry_id) {
                    out.excluded.push(ExcludedEntry {
                        entry_id: *entry_id,
                        reason: ExclusionReason::FetchFailed(error.to_string()),
                    });
                }
            }
            HistoryOutcome::Loaded { rows: records, .. } => {
                for record in records {
                    match by_entry.get(&record.entry_id) {
                        Some(standing) => {
                            contributed.insert(record.entry_id);
                            rows.push(join(record, standing));
                        }
                        None => {
                            if reported.insert(record.entry_id) {
                                out.excluded.push(ExcludedEntry {
                                    entry_id: record.entry_id,
                                    reason: ExclusionReason::MissingStanding,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    for standing in by_entry.values() {
        let entry_id = standing.entry_id();
        if !contributed.contains(&entry_id) && reported.insert(entry_id) {
            out.excluded.push(ExcludedEntry {
                entry_id,
                reason: ExclusionReason::NoHistory,
            });
        }
    }
    out.excluded.sort_by_key(|e| e.entry_id);

    for e in &out.excluded {
        warn!("Entry {} excluded from season: {:?}", e.entry_id, e.reason);
    }

    out.table = LeagueTable::new(rows);
    info!(
        "Canonical table: {} rows, {} participants, {} excluded",
        out.table.len(),
        out.table.participant_count(),
        out.excluded.len()
    );
    out
}

fn join(record: &GameweekRecord, standing: &StandingEntry) -> CanonicalRow {
    CanonicalRow {
        entry_id: record.entry_id,
        player_name: standing.participant.player_name.clone(),
        entry_name: standing.participant.entry_name.clone(),
        gameweek: record.gameweek,
        event_points: record.event_points,
        cumulative_points: record.cumulative_points,
        event_rank: record.event_rank,
        event_rank_sort: record.event_rank_sort,
        overall_rank: record.overall_rank,
        bank: record.bank,
        team_value: record.team_value,
        event_transfers: record.event_transfers,
        event_transfers_cost: record.event_transfers_cost,
        points_on_bench: record.points_on_bench,
        league_rank: standing.snapshot.league_rank,
        last_rank: standing.snapshot.last_rank,
        standings_total: standing.snapshot.standings_total,
        rank_sort: standing.snapshot.rank_sort,
    }
}
