// Core records: participants, standings, gameweek history and the canonical row
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One account entry in the scoring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantRecord {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
}

/// League table position of one participant at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingSnapshot {
    pub entry_id: u64,
    pub standing_id: u64,
    pub league_rank: u64,
    pub last_rank: u64,
    pub standings_total: i64,
    pub rank_sort: u64,
    pub event_total: i64,
}

/// A standings row as delivered by the source: snapshot plus participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingEntry {
    pub snapshot: StandingSnapshot,
    pub participant: ParticipantRecord,
}

impl StandingEntry {
    pub fn entry_id(&self) -> u64 {
        self.participant.entry_id
    }
}

/// One participant's figures for one gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameweekRecord {
    pub entry_id: u64,
    pub gameweek: u32,
    pub event_points: i64,
    pub cumulative_points: i64,
    pub event_rank: Option<u64>,
    pub event_rank_sort: Option<u64>,
    pub overall_rank: u64,
    pub bank: i64,
    pub team_value: i64,
    pub event_transfers: u32,
    pub event_transfers_cost: u32,
    pub points_on_bench: u32,
}

/// A gameweek record joined with its participant's standing and identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRow {
    pub entry_id: u64,
    pub player_name: String,
    pub entry_name: String,
    pub gameweek: u32,
    pub event_points: i64,
    pub cumulative_points: i64,
    pub event_rank: Option<u64>,
    pub event_rank_sort: Option<u64>,
    pub overall_rank: u64,
    pub bank: i64,
    pub team_value: i64,
    pub event_transfers: u32,
    pub event_transfers_cost: u32,
    pub points_on_bench: u32,
    pub league_rank: u64,
    pub last_rank: u64,
    pub standings_total: i64,
    pub rank_sort: u64,
}

impl CanonicalRow {
    /// Points banked for the week after paying for extra transfers.
    pub fn net_points(&self) -> i64 {
        self.event_points - i64::from(self.event_transfers_cost)
    }
}

/// Result of fetching one participant's history.
#[derive(Debug, Clone)]
pub enum HistoryOutcome {
    Loaded {
        entry_id: u64,
        rows: Vec<GameweekRecord>,
    },
    Failed {
        entry_id: u64,
        error: FetchError,
    },
}

impl HistoryOutcome {
    pub fn entry_id(&self) -> u64 {
        match self {
            HistoryOutcome::Loaded { entry_id, .. } | HistoryOutcome::Failed { entry_id, .. } => {
                *entry_id
            }
        }
    }
}

/// Rows decoded from one source body, along with the rows that were rejected.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub rows: Vec<T>,
    pub warnings: Vec<DataWarning>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// A source row dropped because it did not match the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataWarning {
    pub source: String,
    pub index: usize,
    pub reason: String,
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} row {}: {}", self.source, self.index, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed body: {0}")]
    Format(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Format(e.to_string())
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

/// Why a participant contributes no rows to the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExclusionReason {
    FetchFailed(String),
    MissingStanding,
    NoHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedEntry {
    pub entry_id: u64,
    pub reason: ExclusionReason,
}
