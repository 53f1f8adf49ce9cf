use serde_json::Value;

const UNKNOWN: &str = "Unknown";

/// Token budget for the reading completion.
pub const READING_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartHighlights {
    pub sun_sign: String,
    pub moon_sign: String,
    pub ascendant: String,
    pub moon_nakshatra: String,
}

fn planet<'a>(chart: &'a Value, name: &str) -> Option<&'a Value> {
    chart
        .get("planets")?
        .as_array()?
        .iter()
        .find(|p| p.get("name").and_then(Value::as_str) == Some(name))
}

fn text_field(value: Option<&Value>, field: &str) -> String {
    value
        .and_then(|v| v.get(field))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN)
        .to_string()
}

impl ChartHighlights {
    pub fn from_chart(chart: &Value) -> Self {
        let sun = planet(chart, "Sun");
        let moon = planet(chart, "Moon");
        Self {
            sun_sign: text_field(sun, "sign"),
            moon_sign: text_field(moon, "sign"),
            ascendant: text_field(chart.get("ascendant"), "sign"),
            moon_nakshatra: text_field(moon, "nakshatra"),
        }
    }

    pub fn reading_prompt(&self) -> String {
        format!(
            "I need a concise but comprehensive Kundli (Hindu birth chart) analysis based on the following details:

Sun Sign: {}
Moon Sign: {}
Ascendant (Lagna): {}
Moon Nakshatra: {}

Please provide:
1. A brief explanation of what these placements mean for the person's personality and life path
2. Key strengths and challenges based on these positions
3. Any significant indications for career, relationships, or health
4. A short prediction for the next 6-12 months

Keep the tone positive and informative. Limit the response to 5-6 lines.",
            self.sun_sign, self.moon_sign, self.ascendant, self.moon_nakshatra
        )
    }
}
