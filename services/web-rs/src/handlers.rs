//! HTTP handlers for the Shortify web frontend.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────────────┐
//! │ GET/POST /   │ ──▶ │ panels mount │ ──▶ │ page::render_page  │ ──▶ HTML
//! └──────────────┘     │ (tokio::join)│     └────────────────────┘
//!                      └──────┬───────┘
//!                             ▼
//!                   Arc<dyn LinkGateway>
//!                             ▲
//! ┌──────────────┐            │
//! │ /api/*       │ ───────────┘  ──▶ JSON view models or {"error": msg}
//! └──────────────┘
//! ```
//!
//! Panel failures never fail the page: they render inline. The JSON endpoints
//! map [`AppError`] to a status code instead.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use std::sync::Arc;

use crate::enums::PeriodKey;
use crate::errors::AppError;
use crate::models::{HealthResponse, PeriodQuery, ShortenFormBody, ShortenRequest};
use crate::page::{render_page, PageModel};
use crate::panels::{ShortenForm, TimingPanel, TimingView, TrendsPanel, TrendsView};
use crate::state::AppState;

fn record(state: &AppState, handler: &str, method: &str, status: StatusCode) {
    state
        .metrics
        .http_requests_total
        .with_label_values(&[handler, method, status.as_str()])
        .inc();
}

/// Unknown or missing `period` falls back to the configured default.
fn period_for(state: &AppState, query: &PeriodQuery) -> PeriodKey {
    query
        .period
        .as_deref()
        .and_then(PeriodKey::parse)
        .unwrap_or_else(|| state.config.default_period())
}

async fn mount_panels(state: &AppState, period: PeriodKey) -> (TrendsPanel, TimingPanel) {
    let gateway = state.gateway.as_ref();
    let mut trends = TrendsPanel::new(period);
    let mut timing = TimingPanel::new(period);
    tokio::join!(trends.mount(gateway), timing.mount(gateway));

    if trends.state().error().is_some() {
        state.metrics.panel_failures_total.with_label_values(&["trends"]).inc();
    }
    if timing.state().error().is_some() {
        state.metrics.panel_failures_total.with_label_values(&["timing"]).inc();
    }
    (trends, timing)
}

fn page_html(
    state: &AppState,
    period: PeriodKey,
    form: &ShortenForm,
    trends: &TrendsPanel,
    timing: &TimingPanel,
) -> Html<String> {
    Html(render_page(&PageModel {
        period,
        form,
        trends,
        timing,
        demo_mode: state.gateway.name() == "demo",
    }))
}

// ── Health ────────────────────────────────────────────────────────────────────

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: state.gateway_status,
        gateway: state.gateway_status,
        demo_mode: state.gateway.name() == "demo",
    })
}

// ── Metrics ───────────────────────────────────────────────────────────────────

pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    crate::metrics::gather(&state.registry)
}

// ── GET / ─────────────────────────────────────────────────────────────────────

pub async fn page(State(state): State<Arc<AppState>>, Query(query): Query<PeriodQuery>) -> Response {
    let period = period_for(&state, &query);
    let form = ShortenForm::new();
    let (trends, timing) = mount_panels(&state, period).await;

    record(&state, "page", "GET", StatusCode::OK);
    page_html(&state, period, &form, &trends, &timing).into_response()
}

// ── POST / ────────────────────────────────────────────────────────────────────

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeriodQuery>,
    Form(body): Form<ShortenFormBody>,
) -> Response {
    let period = period_for(&state, &query);
    let mut form = ShortenForm::new();
    form.set_input(body.url);

    // The error is already held by the form and rendered inline.
    let (_, (trends, timing)) = tokio::join!(
        form.submit(state.gateway.as_ref()),
        mount_panels(&state, period)
    );

    record(&state, "submit", "POST", StatusCode::OK);
    page_html(&state, period, &form, &trends, &timing).into_response()
}

// ── GET /reset ────────────────────────────────────────────────────────────────

pub async fn reset(State(state): State<Arc<AppState>>, Query(query): Query<PeriodQuery>) -> Redirect {
    record(&state, "reset", "GET", StatusCode::SEE_OTHER);
    match query.period.as_deref().and_then(PeriodKey::parse) {
        Some(period) => Redirect::to(&format!("/?period={}", period.slug())),
        None => Redirect::to("/"),
    }
}

// ── POST /api/shorten ─────────────────────────────────────────────────────────

pub async fn api_shorten(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ShortenRequest>,
) -> Response {
    let mut form = ShortenForm::new();
    form.set_input(payload.url);

    match form.submit(state.gateway.as_ref()).await {
        Ok(outcome) => {
            record(&state, "api_shorten", "POST", StatusCode::OK);
            Json(outcome).into_response()
        }
        Err(e) => error_response(&state, "api_shorten", "POST", e),
    }
}

// ── GET /api/trends, /api/timing ──────────────────────────────────────────────

pub async fn api_trends(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let period = period_for(&state, &query);
    match state.gateway.fetch_analytics(period).await {
        Ok(resp) => {
            record(&state, "api_trends", "GET", StatusCode::OK);
            Json(TrendsView::from_response(period, &resp)).into_response()
        }
        Err(e) => error_response(&state, "api_trends", "GET", e),
    }
}

pub async fn api_timing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let period = period_for(&state, &query);
    match state.gateway.fetch_analytics(period).await {
        Ok(resp) => {
            record(&state, "api_timing", "GET", StatusCode::OK);
            Json(TimingView::from_response(period, &resp)).into_response()
        }
        Err(e) => error_response(&state, "api_timing", "GET", e),
    }
}

fn error_response(state: &AppState, handler: &str, method: &str, e: AppError) -> Response {
    let status = e.status_code();
    if status.is_server_error() {
        tracing::warn!(handler, kind = e.kind(), error = %e, "request failed");
    }
    record(state, handler, method, status);
    e.into_response()
}
