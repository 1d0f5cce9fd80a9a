pub mod analyzer;
pub mod config;
pub mod loader;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod scraper;
