/// Shared enums for the web frontend.
///
/// These enums provide type safety for status fields across the codebase.
/// They serialize to the strings the gateway and the page expect.
use serde::{Deserialize, Serialize};

/// Health check status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Analytics aggregation window. Serializes to the gateway token (`P#30MIN`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodKey {
    #[serde(rename = "P#1MIN")]
    OneMinute,
    #[default]
    #[serde(rename = "P#30MIN")]
    ThirtyMinutes,
    #[serde(rename = "P#1H")]
    OneHour,
    #[serde(rename = "P#24H")]
    TwentyFourHours,
    #[serde(rename = "P#7D")]
    SevenDays,
}

impl PeriodKey {
    pub const ALL: [PeriodKey; 5] = [
        PeriodKey::OneMinute,
        PeriodKey::ThirtyMinutes,
        PeriodKey::OneHour,
        PeriodKey::TwentyFourHours,
        PeriodKey::SevenDays,
    ];

    /// Query parameter value sent to `/ai/latest`.
    pub fn token(self) -> &'static str {
        match self {
            Self::OneMinute => "P#1MIN",
            Self::ThirtyMinutes => "P#30MIN",
            Self::OneHour => "P#1H",
            Self::TwentyFourHours => "P#24H",
            Self::SevenDays => "P#7D",
        }
    }

    /// Short form used in page links (`?period=30m`).
    pub fn slug(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::TwentyFourHours => "24h",
            Self::SevenDays => "7d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneMinute => "1 minute",
            Self::ThirtyMinutes => "30 minutes",
            Self::OneHour => "1 hour",
            Self::TwentyFourHours => "24 hours",
            Self::SevenDays => "7 days",
        }
    }

    /// Accepts either the gateway token or the slug, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.token().eq_ignore_ascii_case(s) || p.slug().eq_ignore_ascii_case(s))
    }
}

/// Bar colour bucket for the timing chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    High,
    Medium,
    Low,
}

impl ColorTier {
    /// Same text as the serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "hsl(220, 72%, 50%)",
            Self::Medium => "hsl(220, 60%, 60%)",
            Self::Low => "hsl(220, 72%, 78%)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_tokens_and_slugs() {
        assert_eq!(PeriodKey::parse("P#1H"), Some(PeriodKey::OneHour));
        assert_eq!(PeriodKey::parse("p#7d"), Some(PeriodKey::SevenDays));
        assert_eq!(PeriodKey::parse("24h"), Some(PeriodKey::TwentyFourHours));
        assert_eq!(PeriodKey::parse("2h"), None);
    }

    #[test]
    fn default_period_is_thirty_minutes() {
        assert_eq!(PeriodKey::default().token(), "P#30MIN");
    }

    #[test]
    fn period_serializes_as_token() {
        let json = serde_json::to_string(&PeriodKey::OneMinute).unwrap();
        assert_eq!(json, "\"P#1MIN\"");
    }

    #[test]
    fn tier_text_matches_serde() {
        for tier in [ColorTier::High, ColorTier::Medium, ColorTier::Low] {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.as_str()));
        }
    }
}
