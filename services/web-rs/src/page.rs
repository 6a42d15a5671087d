//! Page composition: header, the three sections, footer, as one HTML document.
//!
//! ```text
//! ┌──────────── header (brand + anchors) ────────────┐
//! │ #shortener   ShortenForm                          │
//! │ ──────────────────────────────────────────────── │
//! │ #trends      TrendsPanel   (domains | categories) │
//! │ ──────────────────────────────────────────────── │
//! │ #timing      TimingPanel   (chart | best times)   │
//! └──────────── footer ──────────────────────────────┘
//! ```

use std::fmt::Write;

use crate::derive::format_count;
use crate::enums::PeriodKey;
use crate::panels::{Lifecycle, ShortenForm, TimingPanel, TimingView, TrendsPanel, TrendsView};

pub const BRAND: &str = "Shortify";
const TAGLINE: &str = "Serverless URL Shortener. Fast, simple, and clean.";

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;color:#0f172a;background:#f8fafc}
header{position:sticky;top:0;display:flex;justify-content:space-between;align-items:center;padding:0 1rem;height:3.5rem;border-bottom:1px solid #e2e8f0;background:rgba(248,250,252,.85);backdrop-filter:blur(8px)}
header nav a{margin-left:1.5rem;color:#64748b;text-decoration:none;font-size:.875rem}
main{max-width:64rem;margin:0 auto;padding:0 1rem}
section{padding:3rem 0}
hr{border:0;border-top:1px solid #e2e8f0}
.card{background:#fff;border:1px solid #e2e8f0;border-radius:.75rem;padding:1rem}
.grid{display:grid;gap:1.5rem;grid-template-columns:repeat(auto-fit,minmax(18rem,1fr))}
.error{color:#dc2626;text-align:center}
.notice{color:#64748b}
.progress{height:.375rem;background:#e2e8f0;border-radius:9999px}
.progress span{display:block;height:100%;background:hsl(220,72%,50%);border-radius:9999px}
.chart{display:flex;align-items:flex-end;gap:.25rem;height:280px}
.bar{flex:1;display:flex;flex-direction:column;justify-content:flex-end;align-items:center;height:100%;font-size:.625rem}
.bar span{width:100%;border-radius:4px 4px 0 0}
.periods a{margin-right:.75rem}
.periods a.active{font-weight:700}
"#;

/// Everything the page needs, borrowed from the mounted panels.
pub struct PageModel<'a> {
    pub period: PeriodKey,
    pub form: &'a ShortenForm,
    pub trends: &'a TrendsPanel,
    pub timing: &'a TimingPanel,
    pub demo_mode: bool,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(page: &PageModel<'_>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{BRAND}</title><style>{STYLE}</style></head><body>"
    );
    render_header(&mut html);
    html.push_str("<main>");
    if page.demo_mode {
        html.push_str("<p class=\"notice\">Demo mode: showing sample data.</p>");
    }
    render_shortener(&mut html, page.form, page.period);
    html.push_str("<hr>");
    render_period_picker(&mut html, page.period);
    render_trends(&mut html, page.trends);
    html.push_str("<hr>");
    render_timing(&mut html, page.timing);
    html.push_str("</main>");
    render_footer(&mut html);
    html.push_str("</body></html>");
    html
}

fn render_header(html: &mut String) {
    let _ = write!(
        html,
        "<header><strong>{BRAND}</strong><nav aria-label=\"Main navigation\">\
         <a href=\"#shortener\">Shorten</a><a href=\"#trends\">Trends</a>\
         <a href=\"#timing\">Share timing</a></nav></header>"
    );
}

fn render_footer(html: &mut String) {
    let _ = write!(
        html,
        "<footer><div class=\"card\"><strong>&copy; {BRAND}</strong> &mdash; <span class=\"notice\">{TAGLINE}</span></div></footer>"
    );
}

fn render_shortener(html: &mut String, form: &ShortenForm, period: PeriodKey) {
    html.push_str("<section id=\"shortener\"><h1>Make long URLs short</h1>");
    let disabled = if form.is_locked() { " disabled" } else { "" };
    let _ = write!(
        html,
        "<form class=\"card\" method=\"post\" action=\"/?period={slug}\">\
         <input type=\"url\" name=\"url\" aria-label=\"URL to shorten\" \
         placeholder=\"https://example.com/very-long-url...\" value=\"{value}\"{disabled}>",
        slug = period.slug(),
        value = escape_html(form.input()),
    );
    if form.outcome().is_none() {
        html.push_str("<button type=\"submit\">Shorten</button>");
    }
    html.push_str("</form>");

    if let Some(message) = form.error() {
        let _ = write!(
            html,
            "<p class=\"error\" role=\"alert\">{}</p>",
            escape_html(message)
        );
    }

    if let Some(outcome) = form.outcome() {
        let link = escape_html(&outcome.short_link);
        let _ = write!(
            html,
            "<div class=\"card result\"><p>Done</p><p><code>{link}</code></p>\
             <a href=\"{link}\" target=\"_blank\" rel=\"noopener noreferrer\">Open</a> \
             <a href=\"/reset?period={slug}\">Start over</a></div>",
            slug = period.slug(),
        );
    }
    html.push_str("</section>");
}

fn render_period_picker(html: &mut String, active: PeriodKey) {
    html.push_str("<nav class=\"periods\" aria-label=\"Analytics period\">");
    for period in PeriodKey::ALL {
        let class = if period == active { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<a href=\"/?period={}\"{class}>{}</a>",
            period.slug(),
            period.label()
        );
    }
    html.push_str("</nav>");
}

/// Shared rendering of the non-ready lifecycle states. Returns the view when ready.
fn render_lifecycle<'a, T>(html: &mut String, state: &'a Lifecycle<T>) -> Option<&'a T> {
    match state {
        Lifecycle::Idle | Lifecycle::Loading => {
            html.push_str("<p class=\"notice\">Loading…</p>");
            None
        }
        Lifecycle::Failed(message) => {
            let _ = write!(
                html,
                "<p class=\"error\" role=\"alert\">{}</p>",
                escape_html(message)
            );
            None
        }
        Lifecycle::Ready(view) => Some(view),
    }
}

fn render_meta(html: &mut String, generated_at: Option<&str>, notice: Option<&str>) {
    if let Some(ts) = generated_at {
        let _ = write!(html, "<p class=\"notice\">Updated {}</p>", escape_html(ts));
    }
    if let Some(notice) = notice {
        let _ = write!(html, "<p class=\"notice\">{}</p>", escape_html(notice));
    }
}

fn render_trends(html: &mut String, panel: &TrendsPanel) {
    let _ = write!(
        html,
        "<section id=\"trends\"><h2>Popular URL trends</h2><p class=\"notice\">Last {}</p>",
        panel.period().label()
    );
    if let Some(view) = render_lifecycle(html, panel.state()) {
        render_trends_view(html, view);
    }
    html.push_str("</section>");
}

fn render_trends_view(html: &mut String, view: &TrendsView) {
    render_meta(html, view.generated_at.as_deref(), view.notice.as_deref());
    html.push_str("<div class=\"grid\"><div class=\"card\"><h3>Popular domains</h3><ol>");
    for domain in &view.domains {
        let _ = write!(
            html,
            "<li><code>{name}</code> <small>{category}</small> <small>{count}</small>\
             <div class=\"progress\"><span style=\"width:{share}%\"></span></div></li>",
            name = escape_html(&domain.domain),
            category = escape_html(&domain.category),
            count = format_count(domain.click_count),
            share = domain.share_percent,
        );
    }
    html.push_str("</ol></div><div class=\"card\"><h3>By category</h3><ul>");
    for category in &view.categories {
        let _ = write!(
            html,
            "<li><span class=\"{color}\">{icon}</span> <strong>{label}</strong> \
             <small>{count} links</small></li>",
            color = category.color_token,
            icon = escape_html(category.icon),
            label = escape_html(&category.display_label),
            count = escape_html(&category.click_count_label),
        );
    }
    html.push_str("</ul></div></div>");
}

fn render_timing(html: &mut String, panel: &TimingPanel) {
    html.push_str("<section id=\"timing\"><h2>Best time to share</h2>");
    if let Some(view) = render_lifecycle(html, panel.state()) {
        render_timing_view(html, view);
    }
    html.push_str("</section>");
}

fn render_timing_view(html: &mut String, view: &TimingView) {
    render_meta(html, view.generated_at.as_deref(), view.notice.as_deref());
    html.push_str("<div class=\"grid\"><div class=\"card\"><h3>Clicks by hour</h3><div class=\"chart\">");
    let max = view.max_clicks();
    for bar in &view.bars {
        let height = bar.click_count.saturating_mul(100) / max;
        let _ = write!(
            html,
            "<div class=\"bar\" title=\"{count} clicks\"><span data-tier=\"{tier}\" \
             style=\"height:{height}%;background:{color}\"></span>{label}</div>",
            count = bar.click_count,
            tier = bar.tier.as_str(),
            color = bar.color,
            label = escape_html(&bar.hour_label),
        );
    }
    html.push_str("</div></div><div class=\"card\"><h3>Recommended times</h3><ol>");
    for time in &view.recommended {
        let _ = write!(
            html,
            "<li><strong>{}</strong> <small>{}</small></li>",
            escape_html(&time.time),
            time.rank_label
        );
    }
    html.push_str("</ol>");
    if let Some(summary) = &view.summary {
        let _ = write!(
            html,
            "<p class=\"notice\">Links shared {} get the most clicks.</p>",
            escape_html(summary)
        );
    }
    html.push_str("</div></div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::gateway::DemoGateway;
    use crate::testing::StubGateway;
    use serde_json::json;

    fn render(form: &ShortenForm, trends: &TrendsPanel, timing: &TimingPanel) -> String {
        render_page(&PageModel {
            period: trends.period(),
            form,
            trends,
            timing,
            demo_mode: false,
        })
    }

    #[tokio::test]
    async fn sections_render_in_order() {
        let gateway = DemoGateway::new();
        let form = ShortenForm::new();
        let mut trends = TrendsPanel::new(PeriodKey::default());
        let mut timing = TimingPanel::new(PeriodKey::default());
        trends.mount(&gateway).await;
        timing.mount(&gateway).await;

        let html = render(&form, &trends, &timing);
        let shortener = html.find("id=\"shortener\"").unwrap();
        let trends_at = html.find("id=\"trends\"").unwrap();
        let timing_at = html.find("id=\"timing\"").unwrap();
        assert!(shortener < trends_at && trends_at < timing_at);
        assert!(html.contains("youtube.com"));
        assert!(html.contains("21시"));
        assert!(html.contains("between 19:00 and 21:00"));
        assert!(html.contains("data-tier=\"high\""));
        assert!(html.contains("data-tier=\"low\""));
        assert!(html.contains(TAGLINE));
    }

    #[tokio::test]
    async fn not_found_renders_empty_without_error() {
        let gateway = StubGateway::with_analytics(json!({ "found": false }));
        let form = ShortenForm::new();
        let mut trends = TrendsPanel::new(PeriodKey::default());
        let mut timing = TimingPanel::new(PeriodKey::default());
        trends.mount(&gateway).await;
        timing.mount(&gateway).await;

        let html = render(&form, &trends, &timing);
        assert!(!html.contains("class=\"bar\""));
        assert!(!html.contains("role=\"alert\""));
        assert!(html.contains(crate::panels::NO_DATA_NOTICE));
    }

    #[tokio::test]
    async fn failures_and_input_are_escaped() {
        let gateway = StubGateway::failing_analytics(AppError::Request("<b>down</b>".into()));
        let mut form = ShortenForm::new();
        form.set_input("\"><script>alert(1)</script>");
        let _ = form.submit(&gateway).await;
        let mut trends = TrendsPanel::new(PeriodKey::default());
        let mut timing = TimingPanel::new(PeriodKey::default());
        trends.mount(&gateway).await;
        timing.mount(&gateway).await;

        let html = render(&form, &trends, &timing);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;b&gt;down&lt;/b&gt;"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn idle_panels_show_loading() {
        let form = ShortenForm::new();
        let trends = TrendsPanel::new(PeriodKey::SevenDays);
        let timing = TimingPanel::new(PeriodKey::SevenDays);
        let html = render(&form, &trends, &timing);
        assert!(html.contains("Loading…"));
        assert!(html.contains("href=\"/?period=7d\" class=\"active\""));
    }

    #[test]
    fn escape_html_covers_specials() {
        assert_eq!(escape_html("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#39;");
    }
}
