pub mod client;
pub mod summary;

pub use client::NewsApiClient;
pub use summary::{NewsSummarizer, SummaryOutcome};

pub mod prelude {
    pub use super::client::NewsApiClient;
    pub use super::summary::{NewsSummarizer, SummaryOutcome};
    pub use astra_core::{Article, Error, NewsOutcome, NewsSource, Result};
}
