// Decoding of scoring-service JSON bodies into source records.

pub mod fpl_parser;

pub use fpl_parser::{FplParser, StandingsPage};
