use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Query used by the news endpoints when the caller sends none.
pub const DEFAULT_NEWS_QUERY: &str = "latest";

pub const NO_ARTICLES_MESSAGE: &str = "No articles found for the given query.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub description: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// Result of a news search that reached the upstream successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum NewsOutcome {
    Empty,
    Articles(Vec<Article>),
}

impl NewsOutcome {
    pub fn from_articles(articles: Vec<Article>) -> Self {
        if articles.is_empty() {
            NewsOutcome::Empty
        } else {
            NewsOutcome::Articles(articles)
        }
    }

    pub fn articles(&self) -> &[Article] {
        match self {
            NewsOutcome::Empty => &[],
            NewsOutcome::Articles(articles) => articles,
        }
    }
}

/// Birth moment and place extracted from free text.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthDetails {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Hours east of UTC, e.g. 5.5 for India.
    pub timezone: f64,
}

/// Trims the caller's query, substituting `fallback` when nothing is left.
pub fn query_or<'a>(query: Option<&'a str>, fallback: &'a str) -> &'a str {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => fallback,
    }
}
