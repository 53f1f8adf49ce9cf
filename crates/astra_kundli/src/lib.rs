//! Birth-chart ("Kundli") readings.
//!
//! Free text is turned into [`astra_core::BirthDetails`] by the chat model, sent to the
//! astrology API, and the returned chart is summarized by the chat model again.

pub mod chart;
pub mod client;
pub mod parse;
pub mod reader;

pub use chart::ChartHighlights;
pub use client::AstrologyApiClient;
pub use parse::{extract_birth_details, parse_birth_details};
pub use reader::KundliReader;
