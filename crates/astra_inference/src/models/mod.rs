use std::sync::Arc;
use astra_core::{ChatModel, Config, Result};

pub mod chat_completion;
pub mod dummy;

pub use chat_completion::ChatCompletionModel;
pub use dummy::DummyModel;

/// Model name that selects the offline [`DummyModel`].
pub const DUMMY_MODEL_NAME: &str = "dummy";

pub fn create_model(config: &Config) -> Result<Arc<dyn ChatModel>> {
    let model: Arc<dyn ChatModel> = if config.llm_model == DUMMY_MODEL_NAME {
        Arc::new(DummyModel::new())
    } else {
        Arc::new(ChatCompletionModel::new(&config.llm, &config.llm_model)?)
    };
    tracing::info!("🧠 Chat model initialized (using {})", model.name());
    Ok(model)
}
