pub mod models;

pub use models::{create_model, ChatCompletionModel, DummyModel};

pub mod prelude {
    pub use super::models::create_model;
    pub use astra_core::{ChatModel, Config, Error, Result};
}
