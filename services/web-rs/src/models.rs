use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::{HealthStatus, PeriodKey};
use crate::payload;

/// Request body for `POST {gateway}/shorten`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Success body of `POST {gateway}/shorten`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    #[serde(default)]
    pub short_url: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub short_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

// Some gateway builds emit numeric ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(payload::scalar_text(&value).unwrap_or_default())
}

/// Opaque `aiInsight` block. Read through the accessors in [`crate::derive`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insight(pub Value);

/// Opaque `aiTrend` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trend(pub Value);

/// Body of `GET {gateway}/ai/latest`. `found == false` is "no data yet", not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsResponse {
    pub found: bool,
    pub period_key: Option<String>,
    pub generated_at: Option<String>,
    pub trend: Trend,
    pub insight: Insight,
    pub message: Option<String>,
    pub allowed: Vec<String>,
}

impl AnalyticsResponse {
    /// Lenient decode: wrong-typed fields fall back to their defaults instead of failing.
    pub fn from_value(value: &Value) -> Self {
        fn field<'a>(value: &'a Value, wire: &str, alias: &str) -> Option<&'a Value> {
            value.get(wire).or_else(|| value.get(alias))
        }
        let text = |wire: &'static str, alias: &'static str| {
            field(value, wire, alias)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            found: value.get("found").and_then(Value::as_bool).unwrap_or(false),
            period_key: text("periodKey", "periodKey"),
            generated_at: text("aiGeneratedAt", "generatedAt"),
            trend: Trend(field(value, "aiTrend", "trend").cloned().unwrap_or(Value::Null)),
            insight: Insight(field(value, "aiInsight", "insight").cloned().unwrap_or(Value::Null)),
            message: text("message", "message"),
            allowed: value
                .get("allowed")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(payload::scalar_text).collect())
                .unwrap_or_default(),
        }
    }

    /// An empty "not found" response for `period`.
    pub fn empty(period: PeriodKey) -> Self {
        Self {
            period_key: Some(period.token().to_string()),
            ..Self::default()
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub gateway: HealthStatus,
    pub demo_mode: bool,
}

/// Body of the page's shorten form (`application/x-www-form-urlencoded`).
#[derive(Debug, Default, Deserialize)]
pub struct ShortenFormBody {
    #[serde(default)]
    pub url: String,
}

/// `?period=` on page and view endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}
