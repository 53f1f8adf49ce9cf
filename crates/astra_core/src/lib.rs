pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use config::{Config, ServiceConfig};
pub use error::{Error, Result};
pub use models::ChatModel;
pub use sources::{AstrologySource, NewsSource};
pub use types::{Article, BirthDetails, NewsOutcome};
