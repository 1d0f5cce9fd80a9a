use crate::model::{FetchError, GameweekRecord, Parsed, StandingEntry};

/// Everything the season pipeline needs from the scoring service.
#[async_trait::async_trait]
pub trait LeagueSource: Send + Sync {
    async fn fetch_standings(&self, league_id: u64) -> Result<Parsed<StandingEntry>, FetchError>;
    async fn fetch_history(&self, entry_id: u64) -> Result<Parsed<GameweekRecord>, FetchError>;
}
