//! Proxy client for a NewsAPI-style article search service.
//!
//! One upstream call per search, bounded by the configured timeout. The raw
//! upstream payload is trimmed to the fields the dashboard shows; articles
//! missing a title or url are dropped.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use tracker_core::config::NewsConfig;
use tracker_core::error::{TrackerError, TrackerResult};
use url::Url;
use utoipa::ToSchema;

pub struct NewsClient {
    http: reqwest::Client,
    base: String,
    api_key: String,
    page_size: u32,
}

/// Article list returned to our callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewsSearchResponse {
    pub query: String,
    pub total_results: u64,
    pub articles: Vec<NewsArticle>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub source: Option<String>,
    pub image_url: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamResponse {
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<UpstreamArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<UpstreamSource>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamSource {
    name: Option<String>,
}

impl NewsClient {
    /// Build the client from configuration. Constructed once at process
    /// start; the API key is checked lazily so the server can run without
    /// news access.
    pub fn new(config: &NewsConfig) -> TrackerResult<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| TrackerError::Config(format!("invalid news api url: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TrackerError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// Search recent articles matching the query.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> TrackerResult<NewsSearchResponse> {
        if self.api_key.is_empty() {
            return Err(TrackerError::Config(
                "news api key is not configured".to_string(),
            ));
        }

        let page_size = self.page_size.to_string();
        let response = self
            .http
            .get(format!("{}/everything", self.base))
            .query(&[
                ("q", query),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TrackerError::Upstream {
                message: "news api request failed".to_string(),
                details: Some(e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Upstream {
                message: format!("news api returned {status}"),
                details: Some(body),
            });
        }

        let upstream: UpstreamResponse =
            response.json().await.map_err(|e| TrackerError::Upstream {
                message: "news api returned an unreadable body".to_string(),
                details: Some(e.to_string()),
            })?;

        let articles = trim_articles(upstream.articles);
        debug!(query, articles = articles.len(), "News search completed");
        Ok(NewsSearchResponse {
            query: query.to_string(),
            total_results: upstream.total_results,
            articles,
        })
    }
}

fn trim_articles(raw: Vec<UpstreamArticle>) -> Vec<NewsArticle> {
    raw.into_iter()
        .filter_map(|article| {
            let title = article.title?;
            let url = article.url?;
            Some(NewsArticle {
                title,
                description: article.description,
                url,
                source: article.source.and_then(|s| s.name),
                image_url: article.url_to_image,
                published_at: article.published_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: NewsConfig) -> TrackerResult<NewsClient> {
        NewsClient::new(&config)
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = NewsConfig {
            base_url: "not a url".to_string(),
            ..NewsConfig::default()
        };
        assert!(client(config).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let config = NewsConfig {
            base_url: "https://newsapi.org/v2/".to_string(),
            ..NewsConfig::default()
        };
        let client = client(config).unwrap();
        assert_eq!(client.base, "https://newsapi.org/v2");
    }

    #[tokio::test]
    async fn test_search_without_key_is_a_config_error() {
        let config = NewsConfig {
            api_key: String::new(),
            ..NewsConfig::default()
        };
        let err = client(config).unwrap().search("rust").await.unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_trim_drops_articles_missing_title_or_url() {
        let raw = vec![
            UpstreamArticle {
                title: Some("Q3 ad spend rebounds".to_string()),
                description: Some("Spending is up".to_string()),
                url: Some("https://example.com/a".to_string()),
                source: Some(UpstreamSource {
                    name: Some("Example Wire".to_string()),
                }),
                url_to_image: None,
                published_at: Some("2026-08-01T09:00:00Z".to_string()),
            },
            UpstreamArticle {
                title: None,
                description: None,
                url: Some("https://example.com/b".to_string()),
                source: None,
                url_to_image: None,
                published_at: None,
            },
            UpstreamArticle {
                title: Some("No link".to_string()),
                description: None,
                url: None,
                source: None,
                url_to_image: None,
                published_at: None,
            },
        ];
        let trimmed = trim_articles(raw);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].title, "Q3 ad spend rebounds");
        assert_eq!(trimmed[0].source.as_deref(), Some("Example Wire"));
    }

    #[test]
    fn test_upstream_payload_parses_camel_case() {
        let body = serde_json::json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [{
                "source": {"id": null, "name": "Example Wire"},
                "author": "A. Reporter",
                "title": "Q3 ad spend rebounds",
                "description": "Spending is up",
                "url": "https://example.com/a",
                "urlToImage": "https://example.com/a.jpg",
                "publishedAt": "2026-08-01T09:00:00Z",
                "content": "..."
            }]
        });
        let parsed: UpstreamResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.total_results, 2);
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(
            parsed.articles[0].url_to_image.as_deref(),
            Some("https://example.com/a.jpg")
        );
    }
}
