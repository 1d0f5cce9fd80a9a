use league_wrapped::analyzer::{SeasonAnalyzer, SeasonReport};
use league_wrapped::config::{AppConfig, load_config};
use league_wrapped::loader::load_league;
use league_wrapped::normalizer::normalize_load;
use league_wrapped::scraper::FplClient;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            std::process::exit(1);
        }
    };

    let client = match FplClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let load = match load_league(&client, config.league_id, config.max_concurrent_requests).await
    {
        Ok(load) => load,
        Err(e) => {
            error!("Could not load league {}: {}", config.league_id, e);
            std::process::exit(1);
        }
    };
    info!(
        "Fetched league {} at {} ({} histories, {} failed, {} rows dropped)",
        load.league_id,
        load.fetched_at.to_rfc3339(),
        load.histories.len(),
        load.failed_entries().count(),
        load.warnings.len()
    );

    let season = normalize_load(&load);
    for w in &season.warnings {
        warn!("Normalizer: {}", w);
    }

    let report = SeasonAnalyzer::new().analyze(&season);
    log_summary(&report);

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

fn log_summary(report: &SeasonReport) {
    match report.latest_gameweek {
        Some(gw) => info!("Data refreshed for GW {}", gw),
        None => warn!("No gameweek data available"),
    }
    info!("Participants: {}", report.participant_count);
    if let Some(top) = report.best_player_tally.first() {
        info!("Most gameweeks won: {} ({} weeks)", top.entry_name, top.weeks);
    }
    if let Some(bottom) = report.worst_player_tally.first() {
        info!("Most gameweeks lost: {} ({} weeks)", bottom.entry_name, bottom.weeks);
    }
    if let Some(bench) = report.total_points_left_on_bench.first() {
        info!(
            "Most points left on bench: {} ({} pts)",
            bench.entry_name, bench.total_points_on_bench
        );
    }
    if let Some(gap) = &report.biggest_difference {
        info!(
            "Biggest gap: GW {} {} {} vs {} {} ({} pts)",
            gap.gameweek, gap.entry1, gap.points1, gap.entry2, gap.points2, gap.difference
        );
    }
}
