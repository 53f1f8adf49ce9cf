//! Turning free text into [`BirthDetails`] with the help of the chat model.

use chrono::{NaiveDate, NaiveTime};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use astra_core::{BirthDetails, ChatModel, Error, Result};

/// Token budget for the extraction completion.
pub const EXTRACTION_MAX_TOKENS: u32 = 500;

const DATE_FORMAT: &str = "%d-%m-%Y";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Deserialize)]
struct RawBirthDetails {
    date: String,
    time: String,
    location: String,
    #[serde(deserialize_with = "number_or_string")]
    latitude: f64,
    #[serde(deserialize_with = "number_or_string")]
    longitude: f64,
    #[serde(deserialize_with = "number_or_string")]
    timezone: f64,
}

fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("number out of range"))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, found '{}'", s)))?,
        other => return Err(de::Error::custom(format!("expected a number, found {}", other))),
    };
    // NaN and infinities would serialize as null in the chart request.
    if !value.is_finite() {
        return Err(de::Error::custom(format!("expected a finite number, found {}", value)));
    }
    Ok(value)
}

pub fn extraction_prompt(user_input: &str) -> String {
    format!(
        r#"Extract birth details from the following user query in a structured JSON format:
"{}"

Return only a valid JSON object with these fields:
- date: in DD-MM-YYYY format
- time: in HH:MM format (24-hour)
- location: city name
- latitude: numerical latitude of the location
- longitude: numerical longitude of the location
- timezone: timezone offset from UTC in hours

Example response:
{{
    "date": "12-01-2000",
    "time": "10:30",
    "location": "Mumbai",
    "latitude": 19.0760,
    "longitude": 72.8777,
    "timezone": 5.5
}}"#,
        user_input.trim()
    )
}

/// Parse the model's JSON reply. Anything off-schema is a hard failure.
pub fn parse_birth_details(reply: &str) -> Result<BirthDetails> {
    let raw: RawBirthDetails = serde_json::from_str(reply.trim())
        .map_err(|e| Error::Parse(format!("birth details are not valid JSON: {}", e)))?;

    let date = NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT)
        .map_err(|e| Error::Parse(format!("birth date '{}' is not DD-MM-YYYY: {}", raw.date, e)))?;
    let time = NaiveTime::parse_from_str(raw.time.trim(), TIME_FORMAT)
        .map_err(|e| Error::Parse(format!("birth time '{}' is not HH:MM: {}", raw.time, e)))?;

    let location = raw.location.trim().to_string();
    if location.is_empty() {
        return Err(Error::Parse("birth location is empty".to_string()));
    }

    Ok(BirthDetails {
        date,
        time,
        location,
        latitude: raw.latitude,
        longitude: raw.longitude,
        timezone: raw.timezone,
    })
}

pub async fn extract_birth_details(model: &dyn ChatModel, user_input: &str) -> Result<BirthDetails> {
    let reply = model
        .complete_json(&extraction_prompt(user_input), EXTRACTION_MAX_TOKENS)
        .await?;
    tracing::debug!("Birth detail reply: {}", reply);
    parse_birth_details(&reply)
}
