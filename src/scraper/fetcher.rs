use crate::config::AppConfig;
use crate::model::{FetchError, GameweekRecord, Parsed, StandingEntry};
use crate::parser::FplParser;
use crate::scraper::traits::LeagueSource;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the Fantasy Premier League public API.
pub struct FplClient {
    client: Client,
    base_url: String,
    max_standings_pages: u32,
    parser: FplParser,
}

impl FplClient {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            max_standings_pages: config.max_standings_pages,
            parser: FplParser::new(),
        })
    }

    pub fn standings_url(&self, league_id: u64, page: u32) -> String {
        let url = format!("{}leagues-classic/{}/standings/", self.base_url, league_id);
        if page > 1 {
            format!("{}?page_standings={}", url, page)
        } else {
            url
        }
    }

    pub fn history_url(&self, entry_id: u64) -> String {
        format!("{}entry/{}/history/", self.base_url, entry_id)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl LeagueSource for FplClient {
    async fn fetch_standings(&self, league_id: u64) -> Result<Parsed<StandingEntry>, FetchError> {
        let mut all = Parsed::default();
        let mut page = 1;

        loop {
            let body = self.get_text(&self.standings_url(league_id, page)).await?;
            let parsed = self.parser.parse_standings(&body)?;
            all.rows.extend(parsed.entries.rows);
            all.warnings.extend(parsed.entries.warnings);

            if !parsed.has_next {
                break;
            }
            if page >= self.max_standings_pages {
                warn!(
                    "League {} has more than {} standings pages, stopping",
                    league_id, self.max_standings_pages
                );
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    async fn fetch_history(&self, entry_id: u64) -> Result<Parsed<GameweekRecord>, FetchError> {
        let body = self.get_text(&self.history_url(entry_id)).await?;
        self.parser.parse_history(entry_id, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> FplClient {
        FplClient::new(&AppConfig::for_league(123)).unwrap()
    }

    #[test]
    fn standings_url_first_page_has_no_query() {
        assert_eq!(
            client().standings_url(123, 1),
            "https://fantasy.premierleague.com/api/leagues-classic/123/standings/"
        );
    }

    #[test]
    fn standings_url_later_pages_are_numbered() {
        assert_eq!(
            client().standings_url(123, 3),
            "https://fantasy.premierleague.com/api/leagues-classic/123/standings/?page_standings=3"
        );
    }

    #[test]
    fn history_url() {
        assert_eq!(
            client().history_url(456),
            "https://fantasy.premierleague.com/api/entry/456/history/"
        );
    }

    /// Serves standings pages holding one entry whose id is the page number.
    /// `last_page` reports `has_next: false`; `None` never stops.
    async fn serve_standings(last_page: Option<u32>) -> (String, Arc<AtomicU32>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(AtomicU32::new(0));
        let counter = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let page = request
                    .split_whitespace()
                    .nth(1)
                    .and_then(|path| path.split("page_standings=").nth(1))
                    .and_then(|p| p.parse::<u32>().ok())
                    .unwrap_or(1);
                let has_next = last_page.is_none_or(|last| page < last);

                let body = serde_json::json!({
                    "standings": {
                        "has_next": has_next,
                        "page": page,
                        "results": [{
                            "id": page, "event_total": 50, "player_name": format!("P{}", page),
                            "rank": page, "last_rank": page, "rank_sort": page, "total": 100,
                            "entry": page, "entry_name": format!("E{}", page)
                        }]
                    }
                })
                .to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}/api/", addr), requests)
    }

    fn local_client(base_url: String, max_pages: u32) -> FplClient {
        let mut config = AppConfig::for_league(9);
        config.base_url = base_url;
        config.max_standings_pages = max_pages;
        FplClient::new(&config).unwrap()
    }

    async fn standings_ids(client: &FplClient) -> Vec<u64> {
        let parsed = client.fetch_standings(9).await.unwrap();
        assert!(parsed.warnings.is_empty());
        parsed.rows.iter().map(StandingEntry::entry_id).collect()
    }

    #[tokio::test]
    async fn standings_pages_are_joined_in_order() {
        let (base_url, requests) = serve_standings(Some(3)).await;
        let client = local_client(base_url, 10);
        assert_eq!(standings_ids(&client).await, vec![1, 2, 3]);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn standings_stop_at_page_cap() {
        let (base_url, requests) = serve_standings(None).await;
        let client = local_client(base_url, 3);
        assert_eq!(standings_ids(&client).await, vec![1, 2, 3]);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn single_page_league_makes_one_request() {
        let (base_url, requests) = serve_standings(Some(1)).await;
        let client = local_client(base_url, 10);
        assert_eq!(standings_ids(&client).await, vec![1]);
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }
}
