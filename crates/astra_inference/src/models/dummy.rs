use std::fmt;
use astra_core::{ChatModel, Result};

/// Offline stand-in that needs no credentials.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChatModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String> {
        // Take first 20 words and join them
        let words: Vec<&str> = prompt.split_whitespace().take(20).collect();
        Ok(words.join(" "))
    }

    async fn complete_json(&self, _prompt: &str, _max_tokens: u32) -> Result<String> {
        Ok("{}".to_string())
    }
}
