use serde::Serialize;

use super::{empty_notice, format_generated_at, Lifecycle};
use crate::derive::{
    derive_chart_bars, derive_range_summary, derive_recommended_times, derive_time_bucket_series,
    ChartBar, RecommendedTime,
};
use crate::enums::PeriodKey;
use crate::gateway::LinkGateway;
use crate::models::AnalyticsResponse;

/// Hourly click chart plus the recommended sharing times.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingView {
    pub period: PeriodKey,
    pub found: bool,
    pub generated_at: Option<String>,
    pub bars: Vec<ChartBar>,
    pub recommended: Vec<RecommendedTime>,
    pub summary: Option<String>,
    pub notice: Option<String>,
}

impl TimingView {
    pub fn from_response(period: PeriodKey, resp: &AnalyticsResponse) -> Self {
        let (bars, recommended) = if resp.found {
            let series = derive_time_bucket_series(&resp.insight);
            (
                derive_chart_bars(&series),
                derive_recommended_times(&resp.insight),
            )
        } else {
            (Vec::new(), Vec::new())
        };
        Self {
            period,
            found: resp.found,
            generated_at: resp.generated_at.as_deref().map(format_generated_at),
            summary: derive_range_summary(recommended.as_slice()),
            bars,
            recommended,
            notice: empty_notice(resp),
        }
    }

    /// Largest bar, for scaling the chart. Never zero.
    pub fn max_clicks(&self) -> u64 {
        self.bars
            .iter()
            .map(|b| b.click_count)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

pub struct TimingPanel {
    period: PeriodKey,
    state: Lifecycle<TimingView>,
}

impl TimingPanel {
    pub fn new(period: PeriodKey) -> Self {
        Self {
            period,
            state: Lifecycle::Idle,
        }
    }

    pub fn period(&self) -> PeriodKey {
        self.period
    }

    pub fn state(&self) -> &Lifecycle<TimingView> {
        &self.state
    }

    pub async fn mount(&mut self, gateway: &dyn LinkGateway) {
        if !self.state.begin() {
            return;
        }
        let period = self.period;
        let result = gateway
            .fetch_analytics(period)
            .await
            .map(|resp| TimingView::from_response(period, &resp));
        if let Err(e) = &result {
            tracing::warn!(panel = "timing", gateway = gateway.name(), error = %e, "panel failed");
        }
        self.state.settle(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ColorTier;
    use crate::errors::AppError;
    use crate::testing::StubGateway;
    use serde_json::json;

    #[tokio::test]
    async fn mount_builds_chart_and_recommendations() {
        let gateway = StubGateway::with_analytics(json!({
            "found": true,
            "aiInsight": {
                "chart": { "timeBins": [
                    { "time": 21, "clicks": 1000 },
                    { "time": 7, "clicks": 100 },
                    { "time": 19, "clicks": 650 },
                ] },
                "recommendation": { "top3": ["21:00", "19:00", "20:00"] },
            },
        }));
        let mut panel = TimingPanel::new(PeriodKey::TwentyFourHours);
        panel.mount(&gateway).await;

        let view = panel.state().ready().expect("ready");
        let hours: Vec<&str> = view.bars.iter().map(|b| b.hour_label.as_str()).collect();
        assert_eq!(hours, vec!["07시", "19시", "21시"]);
        let tiers: Vec<ColorTier> = view.bars.iter().map(|b| b.tier).collect();
        assert_eq!(tiers, vec![ColorTier::Low, ColorTier::Medium, ColorTier::High]);
        assert_eq!(view.recommended[0].rank_label, "1st choice");
        assert_eq!(view.summary.as_deref(), Some("between 19:00 and 21:00"));
        assert_eq!(view.max_clicks(), 1000);
    }

    #[tokio::test]
    async fn not_found_shows_empty_state_without_error() {
        let gateway = StubGateway::with_analytics(json!({ "found": false }));
        let mut panel = TimingPanel::new(PeriodKey::default());
        panel.mount(&gateway).await;

        assert_eq!(panel.state().error(), None);
        let view = panel.state().ready().expect("ready");
        assert!(view.bars.is_empty());
        assert!(view.recommended.is_empty());
        assert_eq!(view.summary, None);
        assert_eq!(view.max_clicks(), 1);
    }

    #[tokio::test]
    async fn configuration_error_becomes_message() {
        let gateway = StubGateway::failing_analytics(AppError::missing_gateway());
        let mut panel = TimingPanel::new(PeriodKey::default());
        panel.mount(&gateway).await;
        assert_eq!(
            panel.state().error(),
            Some(crate::errors::MISSING_GATEWAY_MESSAGE)
        );
    }
}
