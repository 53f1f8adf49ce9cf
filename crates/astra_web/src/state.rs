use std::sync::Arc;
use astra_core::{ChatModel, NewsSource};
use astra_news::NewsSummarizer;

pub struct AppState {
    pub model: Arc<dyn ChatModel>,
    pub news: Arc<dyn NewsSource>,
    pub summarizer: NewsSummarizer,
}

impl AppState {
    pub fn new(model: Arc<dyn ChatModel>, news: Arc<dyn NewsSource>) -> Self {
        let summarizer = NewsSummarizer::new(news.clone(), model.clone());
        Self { model, news, summarizer }
    }
}
