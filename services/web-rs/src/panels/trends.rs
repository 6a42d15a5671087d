use serde::Serialize;

use super::{empty_notice, format_generated_at, Lifecycle};
use crate::derive::{derive_category_distribution, derive_domain_ranking, CategorySlice, DomainShare};
use crate::enums::PeriodKey;
use crate::gateway::LinkGateway;
use crate::models::AnalyticsResponse;

/// Popular domains and the category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsView {
    pub period: PeriodKey,
    pub found: bool,
    pub generated_at: Option<String>,
    pub domains: Vec<DomainShare>,
    pub categories: Vec<CategorySlice>,
    pub notice: Option<String>,
}

impl TrendsView {
    pub fn from_response(period: PeriodKey, resp: &AnalyticsResponse) -> Self {
        let (domains, categories) = if resp.found {
            (
                derive_domain_ranking(&resp.trend),
                derive_category_distribution(&resp.trend),
            )
        } else {
            (Vec::new(), Vec::new())
        };
        Self {
            period,
            found: resp.found,
            generated_at: resp.generated_at.as_deref().map(format_generated_at),
            domains,
            categories,
            notice: empty_notice(resp),
        }
    }
}

pub struct TrendsPanel {
    period: PeriodKey,
    state: Lifecycle<TrendsView>,
}

impl TrendsPanel {
    pub fn new(period: PeriodKey) -> Self {
        Self {
            period,
            state: Lifecycle::Idle,
        }
    }

    pub fn period(&self) -> PeriodKey {
        self.period
    }

    pub fn state(&self) -> &Lifecycle<TrendsView> {
        &self.state
    }

    /// Fetch once and settle. Later calls are no-ops.
    pub async fn mount(&mut self, gateway: &dyn LinkGateway) {
        if !self.state.begin() {
            return;
        }
        let period = self.period;
        let result = gateway
            .fetch_analytics(period)
            .await
            .map(|resp| TrendsView::from_response(period, &resp));
        if let Err(e) = &result {
            tracing::warn!(panel = "trends", gateway = gateway.name(), error = %e, "panel failed");
        }
        self.state.settle(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::testing::StubGateway;
    use serde_json::json;

    #[tokio::test]
    async fn mount_derives_rankings() {
        let gateway = StubGateway::with_analytics(json!({
            "found": true,
            "aiGeneratedAt": "2026-10-19T00:00:00Z",
            "aiTrend": {
                "topDomains": [
                    { "domain": "youtube.com", "clicks": 3, "category": "video" },
                    { "domain": "github.com", "clicks": 1, "category": "dev" },
                ],
                "topCategories": [ { "category": "video", "clicks": 3 } ],
            },
        }));
        let mut panel = TrendsPanel::new(PeriodKey::OneHour);
        panel.mount(&gateway).await;

        let view = panel.state().ready().expect("ready");
        assert_eq!(view.period, PeriodKey::OneHour);
        assert_eq!(view.domains[0].share_percent, 75);
        assert_eq!(view.domains[1].share_percent, 25);
        assert_eq!(view.categories[0].display_label, "Video");
        assert_eq!(view.generated_at.as_deref(), Some("2026-10-19 00:00 UTC"));
        assert_eq!(view.notice, None);
        assert_eq!(gateway.analytics_calls(), 1);
    }

    #[tokio::test]
    async fn not_found_renders_empty() {
        let gateway = StubGateway::with_analytics(json!({
            "found": false,
            "aiTrend": { "topDomains": [ { "domain": "stale.com", "clicks": 1 } ] },
        }));
        let mut panel = TrendsPanel::new(PeriodKey::default());
        panel.mount(&gateway).await;

        let view = panel.state().ready().expect("not-found is not a failure");
        assert!(view.domains.is_empty());
        assert!(view.categories.is_empty());
        assert!(view.notice.is_some());
    }

    #[tokio::test]
    async fn failure_is_stored_and_not_retried() {
        let gateway = StubGateway::failing_analytics(AppError::Request("gateway down".into()));
        let mut panel = TrendsPanel::new(PeriodKey::default());
        panel.mount(&gateway).await;
        panel.mount(&gateway).await;

        assert_eq!(panel.state().error(), Some("gateway down"));
        assert_eq!(gateway.analytics_calls(), 1);
    }
}
