use async_trait::async_trait;
use crate::types::{BirthDetails, NewsOutcome};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Search for articles matching `query`, returning at most `page_size` of them
    async fn search(&self, query: &str, page_size: u32) -> Result<NewsOutcome>;
}

#[async_trait]
pub trait AstrologySource: Send + Sync {
    /// Fetch the raw birth chart for the given moment and place
    async fn fetch_chart(&self, details: &BirthDetails) -> Result<serde_json::Value>;
}
