// Fetch side: the source capability trait and its HTTP implementation.

pub mod fetcher;
pub mod traits;

pub use fetcher::FplClient;
pub use traits::LeagueSource;
