use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use astra_core::types::{query_or, DEFAULT_NEWS_QUERY};
use astra_core::{Article, Error, NewsOutcome, NewsSource, Result, ServiceConfig};
use std::fmt;

pub(crate) const SERVICE: &str = "news";

/// Upper bound on articles per search.
pub const MAX_PAGE_SIZE: u32 = 5;

#[derive(Deserialize)]
struct EverythingResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

/// NewsAPI `/everything` search client.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl NewsApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let api_key = config.require_api_key("News")?.to_string();
        Ok(Self {
            client: config.http_client()?,
            api_key,
            endpoint: config.endpoint("everything"),
        })
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(&self, query: &str, page_size: u32) -> Result<NewsOutcome> {
        let query = query_or(Some(query), DEFAULT_NEWS_QUERY);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        tracing::info!("📰 Searching news for '{}' (page size {})", query, page_size);

        let response = self.client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("apiKey", self.api_key.as_str()),
                ("language", "en"),
            ])
            .query(&[("pageSize", page_size)])
            .send()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "News search failed: {}", body);
            return Err(Error::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, e))?;
        let parsed: EverythingResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("malformed news response: {}", e)))?;

        if parsed.status.as_deref() == Some("error") {
            return Err(Error::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body: parsed.message.unwrap_or(body),
            });
        }

        let mut articles = parsed.articles.unwrap_or_default();
        articles.truncate(page_size as usize);
        tracing::debug!("Found {} articles for '{}'", articles.len(), query);
        Ok(NewsOutcome::from_articles(articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::{Query, State}, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn spawn_stub(status: StatusCode, reply: &'static str) -> (NewsApiClient, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route(
                "/v2/everything",
                get(move |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                    seen.lock().unwrap().push(params);
                    (status, reply)
                }),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ServiceConfig::new(&format!("http://{}/v2", addr))
            .unwrap()
            .with_api_key(Some("news-key".to_string()));
        (NewsApiClient::new(&config).unwrap(), seen)
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = ServiceConfig::new("https://newsapi.org/v2").unwrap();
        assert!(matches!(NewsApiClient::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_search_maps_articles_in_order() {
        let (client, seen) = spawn_stub(
            StatusCode::OK,
            r#"{"status":"ok","totalResults":2,"articles":[
                {"title":"A","description":"First","publishedAt":"2025-03-01T10:00:00Z","url":"http://a"},
                {"title":"B","description":null,"url":"http://b"}
            ]}"#,
        )
        .await;

        let outcome = client.search("Tesla", 5).await.unwrap();
        assert_eq!(
            outcome,
            NewsOutcome::Articles(vec![
                Article {
                    description: Some("First".to_string()),
                    published_at: Some("2025-03-01T10:00:00Z".to_string()),
                },
                Article {
                    description: None,
                    published_at: None,
                },
            ])
        );

        let seen = seen.lock().unwrap();
        let params = &seen[0];
        assert_eq!(params["q"], "Tesla");
        assert_eq!(params["apiKey"], "news-key");
        assert_eq!(params["language"], "en");
        assert_eq!(params["pageSize"], "5");
    }

    #[tokio::test]
    async fn test_zero_articles_is_empty() {
        let (client, _) =
            spawn_stub(StatusCode::OK, r#"{"status":"ok","totalResults":0,"articles":[]}"#).await;
        assert_eq!(client.search("nothing", 5).await.unwrap(), NewsOutcome::Empty);
    }

    #[tokio::test]
    async fn test_blank_query_and_page_size_are_normalized() {
        let (client, seen) =
            spawn_stub(StatusCode::OK, r#"{"status":"ok","articles":[]}"#).await;
        client.search("  ", 50).await.unwrap();
        client.search("rust", 0).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0]["q"], "latest");
        assert_eq!(seen[0]["pageSize"], "5");
        assert_eq!(seen[1]["pageSize"], "1");
    }

    #[tokio::test]
    async fn test_results_are_capped_at_page_size() {
        let (client, _) = spawn_stub(
            StatusCode::OK,
            r#"{"status":"ok","articles":[
                {"description":"1"},{"description":"2"},{"description":"3"}
            ]}"#,
        )
        .await;
        let outcome = client.search("rust", 2).await.unwrap();
        assert_eq!(outcome.articles().len(), 2);
    }

    #[tokio::test]
    async fn test_http_error_is_tagged() {
        let (client, _) = spawn_stub(
            StatusCode::UNAUTHORIZED,
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#,
        )
        .await;
        match client.search("rust", 5).await {
            Err(Error::UpstreamStatus { status, body, .. }) => {
                assert_eq!(status, 401);
                assert!(body.contains("apiKeyInvalid"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_in_ok_body_is_not_empty() {
        let (client, _) = spawn_stub(
            StatusCode::OK,
            r#"{"status":"error","message":"rate limited"}"#,
        )
        .await;
        match client.search("rust", 5).await {
            Err(Error::UpstreamStatus { body, .. }) => assert_eq!(body, "rate limited"),
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
