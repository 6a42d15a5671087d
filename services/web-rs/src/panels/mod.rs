//! Stateful page sections. Each owns its request lifecycle and hands the
//! gateway's answer to [`crate::derive`] for display.

pub mod lifecycle;
pub mod shorten_form;
pub mod timing;
pub mod trends;

pub use lifecycle::Lifecycle;
pub use shorten_form::{FormState, ShortenForm, ShortenOutcome};
pub use timing::{TimingPanel, TimingView};
pub use trends::{TrendsPanel, TrendsView};

use chrono::{DateTime, Utc};

use crate::models::AnalyticsResponse;

pub const NO_DATA_NOTICE: &str = "No analysis is available for this period yet.";

/// `aiGeneratedAt` for display. Non RFC 3339 values are shown as received.
pub fn format_generated_at(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Message shown in place of charts when the gateway has nothing for the period.
pub fn empty_notice(resp: &AnalyticsResponse) -> Option<String> {
    if resp.found {
        return None;
    }
    if let Some(message) = resp.message.as_deref().filter(|m| !m.trim().is_empty()) {
        return Some(message.to_string());
    }
    if resp.allowed.is_empty() {
        Some(NO_DATA_NOTICE.to_string())
    } else {
        Some(format!(
            "{NO_DATA_NOTICE} Available periods: {}",
            resp.allowed.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_at_formats_rfc3339() {
        assert_eq!(
            format_generated_at("2026-10-19T21:05:00+09:00"),
            "2026-10-19 12:05 UTC"
        );
        assert_eq!(format_generated_at("yesterday"), "yesterday");
    }

    #[test]
    fn notice_only_when_not_found() {
        let found = AnalyticsResponse {
            found: true,
            ..AnalyticsResponse::default()
        };
        assert_eq!(empty_notice(&found), None);

        let bare = AnalyticsResponse::default();
        assert_eq!(empty_notice(&bare).as_deref(), Some(NO_DATA_NOTICE));

        let with_message = AnalyticsResponse {
            message: Some("warming up".into()),
            ..AnalyticsResponse::default()
        };
        assert_eq!(empty_notice(&with_message).as_deref(), Some("warming up"));

        let with_allowed = AnalyticsResponse {
            allowed: vec!["P#1H".into(), "P#24H".into()],
            ..AnalyticsResponse::default()
        };
        assert!(empty_notice(&with_allowed)
            .unwrap()
            .ends_with("Available periods: P#1H, P#24H"));
    }
}
