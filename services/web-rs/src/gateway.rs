//! Client for the remote URL-shortening gateway.
//!
//! ```text
//! ┌──────────────┐  POST /shorten {url}          ┌──────────────┐
//! │              │ ────────────────────────────▶ │              │
//! │ GatewayClient│                               │  API Gateway │
//! │              │ ────────────────────────────▶ │              │
//! └──────────────┘  GET /ai/latest?periodKey=…   └──────────────┘
//!        ▲
//!        │ Arc<dyn LinkGateway>
//! ┌──────┴───────┐
//! │    panels    │   DemoGateway answers from static data instead
//! └──────────────┘
//! ```
//!
//! No retries, no caching. Every non-success status becomes [`AppError::Request`]
//! with the message the gateway put in its body.

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::normalize_base_url;
use crate::enums::PeriodKey;
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::models::{AnalyticsResponse, ShortenRequest, ShortenResponse};

pub const SHORTEN_FAILED_MESSAGE: &str = "Failed to shorten URL.";
pub const DEMO_SHORT_DOMAIN: &str = "https://shortify.cloud";
const DEMO_CODE_LENGTH: usize = 7;

#[async_trait]
pub trait LinkGateway: Send + Sync {
    async fn shorten_url(&self, original_url: &str) -> Result<ShortenResponse, AppError>;

    async fn fetch_analytics(&self, period: PeriodKey) -> Result<AnalyticsResponse, AppError>;

    /// Base for user-facing short links, when the gateway also serves redirects.
    fn link_base(&self) -> Option<&str>;

    /// Source name for logs and the health endpoint.
    fn name(&self) -> &'static str;
}

/// HTTP implementation against `{base}/shorten` and `{base}/ai/latest`.
pub struct GatewayClient {
    base_url: Option<String>,
    http: Client,
    metrics: Option<&'static AppMetrics>,
}

impl GatewayClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_deref()),
            http: Client::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: &'static AppMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn require_base(&self) -> Result<&str, AppError> {
        self.base_url.as_deref().ok_or_else(AppError::missing_gateway)
    }

    fn record(&self, operation: &str, result: &Result<impl Sized, AppError>) {
        if let Some(metrics) = self.metrics {
            let outcome = match result {
                Ok(_) => "ok",
                Err(e) => e.kind(),
            };
            metrics
                .gateway_requests_total
                .with_label_values(&[operation, outcome])
                .inc();
        }
    }

    async fn post_shorten(&self, original_url: &str) -> Result<ShortenResponse, AppError> {
        let base = self.require_base()?;
        let resp = self
            .http
            .post(format!("{base}/shorten"))
            .json(&ShortenRequest {
                url: original_url.to_string(),
            })
            .send()
            .await?;

        let status = resp.status();
        let body = read_json_body(resp).await;
        if !status.is_success() {
            let message = body
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| SHORTEN_FAILED_MESSAGE.to_string());
            tracing::warn!(status = status.as_u16(), %message, "shorten rejected by gateway");
            return Err(AppError::Request(message));
        }

        let unreadable = || AppError::Request(SHORTEN_FAILED_MESSAGE.to_string());
        let body = body.ok_or_else(unreadable)?;
        let parsed: ShortenResponse = serde_json::from_value(body).map_err(|e| {
            tracing::warn!("unreadable shorten response: {e}");
            unreadable()
        })?;
        // A reply with neither an id nor a URL leaves nothing to link to.
        if parsed.short_id.trim().is_empty() && parsed.short_url.trim().is_empty() {
            tracing::warn!("shorten response carried no short link");
            return Err(unreadable());
        }
        Ok(parsed)
    }

    async fn get_latest(&self, period: PeriodKey) -> Result<AnalyticsResponse, AppError> {
        let base = self.require_base()?;
        // `.query` percent-encodes the token; a raw `#` would end the URL.
        let resp = self
            .http
            .get(format!("{base}/ai/latest"))
            .query(&[("periodKey", period.token())])
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = resp.status();
        let body = read_json_body(resp).await;
        let fallback = || format!("Failed to fetch analytics (HTTP {})", status.as_u16());
        if !status.is_success() {
            let message = body.as_ref().and_then(error_message).unwrap_or_else(fallback);
            tracing::warn!(status = status.as_u16(), period = period.token(), %message, "analytics fetch failed");
            return Err(AppError::Request(message));
        }

        // A non-JSON success body (proxy error page) is a failure, not "no data".
        match body {
            Some(body) => Ok(AnalyticsResponse::from_value(&body)),
            None => {
                tracing::warn!(status = status.as_u16(), period = period.token(), "unreadable analytics response");
                Err(AppError::Request(fallback()))
            }
        }
    }
}

#[async_trait]
impl LinkGateway for GatewayClient {
    async fn shorten_url(&self, original_url: &str) -> Result<ShortenResponse, AppError> {
        let result = self.post_shorten(original_url).await;
        self.record("shorten", &result);
        result
    }

    async fn fetch_analytics(&self, period: PeriodKey) -> Result<AnalyticsResponse, AppError> {
        let result = self.get_latest(period).await;
        self.record("ai_latest", &result);
        result
    }

    fn link_base(&self) -> Option<&str> {
        self.base_url()
    }

    fn name(&self) -> &'static str {
        "gateway"
    }
}

/// Best-effort JSON body; `None` when it cannot be read or parsed.
async fn read_json_body(resp: reqwest::Response) -> Option<Value> {
    match resp.bytes().await {
        Ok(bytes) => serde_json::from_slice(&bytes).ok(),
        Err(e) => {
            tracing::warn!("failed to read gateway body: {e}");
            None
        }
    }
}

/// The gateway reports failures as `{ "error": ... }` or `{ "message": ... }`.
fn error_message(body: &Value) -> Option<String> {
    ["error", "message"].iter().find_map(|key| {
        body.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

// ── Demo source ───────────────────────────────────────────────────────────────

/// Static data for running the page without a gateway.
pub struct DemoGateway {
    short_domain: String,
}

impl DemoGateway {
    pub fn new() -> Self {
        Self {
            short_domain: DEMO_SHORT_DOMAIN.to_string(),
        }
    }
}

impl Default for DemoGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DEMO_CODE_LENGTH)
        .map(char::from)
        .collect()
}

const DEMO_HOURLY_CLICKS: [(u32, u64); 18] = [
    (6, 120),
    (7, 280),
    (8, 450),
    (9, 680),
    (10, 520),
    (11, 410),
    (12, 720),
    (13, 580),
    (14, 490),
    (15, 380),
    (16, 350),
    (17, 420),
    (18, 610),
    (19, 780),
    (20, 890),
    (21, 950),
    (22, 820),
    (23, 540),
];

const DEMO_DOMAINS: [(&str, u64, &str); 6] = [
    ("youtube.com", 12840, "video"),
    ("github.com", 8920, "dev"),
    ("notion.so", 6450, "productivity"),
    ("medium.com", 4280, "blog"),
    ("figma.com", 3190, "design"),
    ("twitter.com", 2760, "sns"),
];

const DEMO_CATEGORIES: [(&str, u64); 6] = [
    ("video", 15200),
    ("blog", 9800),
    ("dev", 8900),
    ("sns", 7100),
    ("productivity", 5300),
    ("design", 3200),
];

/// Analytics payload in the gateway's wire shape, so demo data goes through the
/// same decoding and derivation as live data.
pub fn demo_payload(period: PeriodKey) -> Value {
    let time_bins: Vec<Value> = DEMO_HOURLY_CLICKS
        .iter()
        .map(|(hour, clicks)| json!({ "time": format!("{hour:02}"), "clicks": clicks }))
        .collect();
    let domains: Vec<Value> = DEMO_DOMAINS
        .iter()
        .map(|(domain, clicks, category)| {
            json!({ "domain": domain, "clicks": clicks, "category": category })
        })
        .collect();
    let categories: Vec<Value> = DEMO_CATEGORIES
        .iter()
        .map(|(category, clicks)| json!({ "category": category, "clicks": clicks }))
        .collect();

    json!({
        "found": true,
        "periodKey": period.token(),
        "aiGeneratedAt": chrono::Utc::now().to_rfc3339(),
        "aiTrend": {
            "topDomains": domains,
            "topCategories": categories,
        },
        "aiInsight": {
            "chart": { "timeBins": time_bins },
            "recommendation": { "top3": ["21:00", "20:00", "19:00"] },
        },
    })
}

#[async_trait]
impl LinkGateway for DemoGateway {
    async fn shorten_url(&self, original_url: &str) -> Result<ShortenResponse, AppError> {
        let code = demo_code();
        Ok(ShortenResponse {
            short_url: format!("{}/{}", self.short_domain, code),
            short_id: code,
            title: None,
            original_url: Some(original_url.to_string()),
        })
    }

    async fn fetch_analytics(&self, period: PeriodKey) -> Result<AnalyticsResponse, AppError> {
        Ok(AnalyticsResponse::from_value(&demo_payload(period)))
    }

    fn link_base(&self) -> Option<&str> {
        None
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}

/// The link shown to the user: `{base}/{shortId}` when the gateway serves redirects,
/// else the `shortUrl` it returned.
pub fn short_link(link_base: Option<&str>, resp: &ShortenResponse) -> String {
    let id = resp.short_id.trim();
    match link_base {
        Some(base) if !id.is_empty() => format!("{base}/{}", urlencoding::encode(id)),
        _ => resp.short_url.clone(),
    }
}
