use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// Placeholder returned when the model answers without any text.
pub const EMPTY_COMPLETION: &str = "No response data received.";

#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Send `prompt` as the only user message and return the first choice's text.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;

    /// Like [`ChatModel::complete`], but asks the model to answer with a JSON object.
    async fn complete_json(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        self.complete(prompt, max_tokens).await
    }
}
