use std::sync::Arc;
use astra_core::{AstrologySource, BirthDetails, ChatModel, Result};
use crate::chart::{ChartHighlights, READING_MAX_TOKENS};
use crate::parse::extract_birth_details;

/// Runs parse, fetch, summarize and render in order; the first failure stops the run.
pub struct KundliReader {
    model: Arc<dyn ChatModel>,
    astrology: Arc<dyn AstrologySource>,
}

impl KundliReader {
    pub fn new(model: Arc<dyn ChatModel>, astrology: Arc<dyn AstrologySource>) -> Self {
        Self { model, astrology }
    }

    pub async fn read(&self, user_input: &str) -> Result<String> {
        let details = extract_birth_details(self.model.as_ref(), user_input).await?;
        tracing::info!(
            "Parsed birth details: {} {} in {}",
            details.date,
            details.time.format("%H:%M"),
            details.location
        );

        let chart = self.astrology.fetch_chart(&details).await?;
        let highlights = ChartHighlights::from_chart(&chart);
        tracing::debug!(?highlights, "Chart highlights");

        let summary = self
            .model
            .complete(&highlights.reading_prompt(), READING_MAX_TOKENS)
            .await?;
        Ok(render(&details, &summary))
    }
}

pub fn render(details: &BirthDetails, summary: &str) -> String {
    format!(
        "Kundli Analysis for birth on {} at {} in {}:\n\n{}",
        details.date.format("%d %b %Y"),
        details.time.format("%H:%M"),
        details.location,
        summary
    )
}
