//! In-memory gateway for panel, page and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::enums::PeriodKey;
use crate::errors::AppError;
use crate::gateway::LinkGateway;
use crate::models::{AnalyticsResponse, ShortenResponse};

pub struct StubGateway {
    shorten: Result<ShortenResponse, AppError>,
    analytics: Result<Value, AppError>,
    link_base: Option<String>,
    analytics_calls: AtomicUsize,
    requested_periods: Mutex<Vec<PeriodKey>>,
    shortened: Mutex<Vec<String>>,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self {
            shorten: Err(AppError::Request("shorten not stubbed".into())),
            analytics: Ok(json!({ "found": false })),
            link_base: None,
            analytics_calls: AtomicUsize::new(0),
            requested_periods: Mutex::new(Vec::new()),
            shortened: Mutex::new(Vec::new()),
        }
    }
}

impl StubGateway {
    pub fn with_analytics(payload: Value) -> Self {
        Self {
            analytics: Ok(payload),
            ..Self::default()
        }
    }

    pub fn failing_analytics(err: AppError) -> Self {
        Self {
            analytics: Err(err),
            ..Self::default()
        }
    }

    pub fn with_shorten(resp: ShortenResponse) -> Self {
        Self {
            shorten: Ok(resp),
            ..Self::default()
        }
    }

    pub fn failing_shorten(err: AppError) -> Self {
        Self {
            shorten: Err(err),
            ..Self::default()
        }
    }

    pub fn with_link_base(mut self, base: &str) -> Self {
        self.link_base = Some(base.to_string());
        self
    }

    pub fn analytics_calls(&self) -> usize {
        self.analytics_calls.load(Ordering::SeqCst)
    }

    pub fn requested_periods(&self) -> Vec<PeriodKey> {
        self.requested_periods.lock().unwrap().clone()
    }

    pub fn shortened_urls(&self) -> Vec<String> {
        self.shortened.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkGateway for StubGateway {
    async fn shorten_url(&self, original_url: &str) -> Result<ShortenResponse, AppError> {
        self.shortened.lock().unwrap().push(original_url.to_string());
        self.shorten.clone()
    }

    async fn fetch_analytics(&self, period: PeriodKey) -> Result<AnalyticsResponse, AppError> {
        self.analytics_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_periods.lock().unwrap().push(period);
        self.analytics
            .as_ref()
            .map(AnalyticsResponse::from_value)
            .map_err(Clone::clone)
    }

    fn link_base(&self) -> Option<&str> {
        self.link_base.as_deref()
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
