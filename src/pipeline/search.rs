use crate::models::EvidenceSnippet;
use crate::pipeline::traits::EvidenceSearch;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_SEARCH_URL: &str = "https://google.serper.dev/search";
pub const MAX_SNIPPETS: usize = 5;

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    gl: &'static str,
    hl: &'static str,
    num: usize,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Default, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

/// Google results through the Serper API. Without a key every search is empty.
pub struct WebSearch {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl WebSearch {
    pub fn new(api_key: Option<String>, endpoint: &str, timeout: Duration) -> Self {
        if api_key.is_none() {
            warn!("search API key not configured, claim verification disabled");
        }
        let client = match Client::builder()
            .user_agent(concat!("claimcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!(error = %err, "failed to build search client, falling back to defaults without a timeout");
                Client::new()
            }
        };
        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn query(&self, api_key: &str, claim: &str) -> reqwest::Result<Vec<EvidenceSnippet>> {
        let body = SearchRequest {
            q: claim,
            gl: "us",
            hl: "en",
            num: MAX_SNIPPETS,
        };
        let response: SearchResponse = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(to_snippets(response))
    }
}

fn to_snippets(response: SearchResponse) -> Vec<EvidenceSnippet> {
    response
        .organic
        .into_iter()
        .take(MAX_SNIPPETS)
        .map(|r| EvidenceSnippet {
            title: r.title.unwrap_or_default(),
            snippet: r.snippet.unwrap_or_default(),
            url: r.link.unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl EvidenceSearch for WebSearch {
    async fn search(&self, claim: &str) -> Vec<EvidenceSnippet> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Vec::new();
        };
        match self.query(api_key, claim).await {
            Ok(snippets) => {
                debug!(results = snippets.len(), "search complete");
                snippets
            }
            Err(err) => {
                warn!(error = %err, "search failed, continuing without evidence");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_results_in_rank_order_with_defaults() {
        let raw = r#"{
            "searchParameters": {"q": "x"},
            "organic": [
                {"title": "First", "snippet": "one", "link": "https://a.example/1", "position": 1},
                {"snippet": "no title"},
                {"title": "Third", "link": "https://c.example/3"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        let snippets = to_snippets(response);
        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets[0].title, "First");
        assert_eq!(snippets[0].url, "https://a.example/1");
        assert_eq!(snippets[1].title, "");
        assert_eq!(snippets[1].url, "");
        assert_eq!(snippets[2].snippet, "");
    }

    #[test]
    fn keeps_at_most_five_results() {
        let organic = (0..8)
            .map(|i| OrganicResult {
                title: Some(format!("r{i}")),
                snippet: None,
                link: Some(format!("https://r.example/{i}")),
            })
            .collect();
        let snippets = to_snippets(SearchResponse { organic });
        assert_eq!(snippets.len(), MAX_SNIPPETS);
        assert_eq!(snippets[4].title, "r4");
    }

    #[test]
    fn missing_organic_block_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(to_snippets(response).is_empty());
    }

    #[tokio::test]
    async fn disabled_search_returns_nothing() {
        let search = WebSearch::new(None, DEFAULT_SEARCH_URL, Duration::from_secs(1));
        assert!(!search.is_enabled());
        assert!(search.search("The sky is green").await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_empty() {
        let search = WebSearch::new(
            Some("test-key".into()),
            "http://127.0.0.1:9/search",
            Duration::from_millis(500),
        );
        assert!(search.search("The sky is green").await.is_empty());
    }

    #[tokio::test]
    async fn hung_endpoint_times_out_to_empty() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let search = WebSearch::new(
            Some("test-key".into()),
            &format!("http://{addr}/search"),
            Duration::from_millis(200),
        );
        let started = std::time::Instant::now();
        assert!(search.search("The sky is green").await.is_empty());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
