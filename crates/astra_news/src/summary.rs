use std::fmt::Write;
use std::sync::Arc;
use astra_core::types::{query_or, DEFAULT_NEWS_QUERY, NO_ARTICLES_MESSAGE};
use astra_core::{Article, ChatModel, NewsOutcome, NewsSource, Result};
use crate::client::MAX_PAGE_SIZE;

/// Token budget for the digest completion.
pub const SUMMARY_MAX_TOKENS: u32 = 1024;

const DIGEST_INSTRUCTION: &str = "Based on the news above, provide a concise 5-line summary that starts with \"As of...\". Ignore URLs and focus on descriptions and dates.";

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Empty,
    Digest(String),
}

impl SummaryOutcome {
    /// Text shown to the caller; the empty case uses the fixed no-articles message.
    pub fn into_text(self) -> String {
        match self {
            SummaryOutcome::Empty => NO_ARTICLES_MESSAGE.to_string(),
            SummaryOutcome::Digest(text) => text,
        }
    }
}

/// Builds the digest prompt: one numbered block per article, then the instruction.
pub fn render_prompt(query: &str, articles: &[Article]) -> String {
    let mut prompt = format!("Here is the latest news about '{}':\n\n", query);
    for (idx, article) in articles.iter().enumerate() {
        let _ = write!(
            prompt,
            "Article {}:\nDescription: {}\nPublished At: {}\n\n",
            idx + 1,
            article.description.as_deref().unwrap_or("No description"),
            article.published_at.as_deref().unwrap_or("Unknown date"),
        );
    }
    prompt.push('\n');
    prompt.push_str(DIGEST_INSTRUCTION);
    prompt
}

/// Fetches articles for a query and condenses them through the chat model.
pub struct NewsSummarizer {
    news: Arc<dyn NewsSource>,
    model: Arc<dyn ChatModel>,
}

impl NewsSummarizer {
    pub fn new(news: Arc<dyn NewsSource>, model: Arc<dyn ChatModel>) -> Self {
        Self { news, model }
    }

    pub async fn summarize(&self, query: &str) -> Result<SummaryOutcome> {
        let query = query_or(Some(query), DEFAULT_NEWS_QUERY);
        let articles = match self.news.search(query, MAX_PAGE_SIZE).await? {
            NewsOutcome::Empty => {
                tracing::info!("No articles for '{}', skipping digest", query);
                return Ok(SummaryOutcome::Empty);
            }
            NewsOutcome::Articles(articles) => articles,
        };

        let prompt = render_prompt(query, &articles);
        tracing::debug!("Digest prompt for '{}' covers {} articles", query, articles.len());
        let digest = self.model.complete(&prompt, SUMMARY_MAX_TOKENS).await?;
        Ok(SummaryOutcome::Digest(digest))
    }
}
