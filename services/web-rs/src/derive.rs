//! View-model derivation: raw analytics payload → chart-ready rows.
//!
//! Everything here is pure and total. A missing or malformed payload produces
//! empty collections, never an error.

use serde::Serialize;

use crate::enums::ColorTier;
use crate::models::{Insight, Trend};
use crate::payload::{array_at, count_field, count_of, is_truthy, scalar_text, text_field};

const RANK_LABELS: [&str; 3] = ["1st choice", "2nd choice", "3rd choice"];
const HOUR_SUFFIX: &str = "시";
const HIGH_RATIO: f64 = 0.85;
const MEDIUM_RATIO: f64 = 0.60;

/// One hour-of-day bucket of the click series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub hour_label: String,
    pub click_count: u64,
}

/// A bucket with its bar colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBar {
    pub hour_label: String,
    pub click_count: u64,
    pub tier: ColorTier,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTime {
    pub rank_label: &'static str,
    pub time: String,
}

impl AsRef<str> for RecommendedTime {
    fn as_ref(&self) -> &str {
        &self.time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainShare {
    pub domain: String,
    pub click_count: u64,
    pub share_percent: u32,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category_key: String,
    pub display_label: String,
    pub icon: &'static str,
    pub color_token: &'static str,
    pub click_count_label: String,
}

/// Display style for a category key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub color_token: &'static str,
    aliases: &'static [&'static str],
}

const CATEGORY_STYLES: &[CategoryStyle] = &[
    CategoryStyle {
        key: "video",
        label: "Video",
        icon: "▶",
        color_token: "bg-chart-1 text-primary-foreground",
        aliases: &["동영상", "videos"],
    },
    CategoryStyle {
        key: "blog",
        label: "Blog",
        icon: "✎",
        color_token: "bg-chart-2 text-primary-foreground",
        aliases: &["블로그", "blogs"],
    },
    CategoryStyle {
        key: "dev",
        label: "Development",
        icon: "</>",
        color_token: "bg-chart-3 text-primary-foreground",
        aliases: &["개발", "development"],
    },
    CategoryStyle {
        key: "sns",
        label: "Social",
        icon: "@",
        color_token: "bg-chart-4 text-primary-foreground",
        aliases: &["social"],
    },
    CategoryStyle {
        key: "productivity",
        label: "Productivity",
        icon: "⚡",
        color_token: "bg-chart-5 text-primary-foreground",
        aliases: &["생산성"],
    },
    CategoryStyle {
        key: "design",
        label: "Design",
        icon: "◇",
        color_token: "bg-muted-foreground text-card",
        aliases: &["디자인"],
    },
];

const OTHER_STYLE: CategoryStyle = CategoryStyle {
    key: "other",
    label: "Other",
    icon: "•",
    color_token: "bg-secondary text-secondary-foreground",
    aliases: &["기타"],
};

/// Resolve a category key (or one of its aliases) to its display style.
pub fn category_style(key: &str) -> CategoryStyle {
    let key = key.trim();
    CATEGORY_STYLES
        .iter()
        .copied()
        .find(|style| {
            style.key.eq_ignore_ascii_case(key)
                || style.aliases.iter().any(|a| a.eq_ignore_ascii_case(key))
        })
        .unwrap_or(OTHER_STYLE)
}

fn zero_pad2(hour: &str) -> String {
    format!("{hour:0>2}")
}

/// `insight.chart.timeBins` as an hour-sorted series.
pub fn derive_time_bucket_series(insight: &Insight) -> Vec<TimeBucket> {
    let mut keyed: Vec<(String, u64)> = array_at(&insight.0, &["chart", "timeBins"])
        .iter()
        .map(|bin| {
            let hour = bin.get("time").and_then(scalar_text).unwrap_or_default();
            (zero_pad2(&hour), count_of(bin.get("clicks")))
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed
        .into_iter()
        .map(|(hour, click_count)| TimeBucket {
            hour_label: format!("{hour}{HOUR_SUFFIX}"),
            click_count,
        })
        .collect()
}

/// `insight.recommendation.top3`, falsy entries dropped, at most three.
pub fn derive_recommended_times(insight: &Insight) -> Vec<RecommendedTime> {
    array_at(&insight.0, &["recommendation", "top3"])
        .iter()
        .filter(|v| is_truthy(v))
        .filter_map(scalar_text)
        .take(RANK_LABELS.len())
        .zip(RANK_LABELS)
        .map(|(time, rank_label)| RecommendedTime { rank_label, time })
        .collect()
}

/// Human summary of the recommended window.
///
/// `HH:MM` strings are fixed-width and zero-padded, so lexicographic order is
/// chronological order.
pub fn derive_range_summary<S: AsRef<str>>(times: &[S]) -> Option<String> {
    match times {
        [] => None,
        [only] => Some(format!("around {}", only.as_ref())),
        _ => {
            let mut sorted: Vec<&str> = times.iter().map(AsRef::as_ref).collect();
            sorted.sort_unstable();
            let first = sorted.first()?;
            let last = sorted.last()?;
            Some(format!("between {first} and {last}"))
        }
    }
}

/// Integer shares of `counts` that never sum past 100.
///
/// Each share is rounded to the nearest integer. If that overshoots 100, the
/// shares that gained the most from rounding up give back one point each.
pub fn share_percents(counts: &[u64]) -> Vec<u32> {
    let total: u128 = counts.iter().map(|&c| c as u128).sum();
    if total == 0 {
        return vec![0; counts.len()];
    }
    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * 100.0 / total as f64)
        .collect();
    let mut shares: Vec<u32> = exact.iter().map(|e| e.round() as u32).collect();
    let mut sum: u32 = shares.iter().sum();
    while sum > 100 {
        let Some((idx, _)) = shares
            .iter()
            .zip(&exact)
            .enumerate()
            .filter(|(_, (share, _))| **share > 0)
            .map(|(i, (share, e))| (i, *share as f64 - e))
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            break;
        };
        shares[idx] -= 1;
        sum -= 1;
    }
    shares
}

/// `trend.topDomains` with each domain's share of the listed clicks.
pub fn derive_domain_ranking(trend: &Trend) -> Vec<DomainShare> {
    let entries = array_at(&trend.0, &["topDomains"]);
    let counts: Vec<u64> = entries
        .iter()
        .map(|e| count_field(e, &["clicks", "count"]))
        .collect();
    let shares = share_percents(&counts);
    entries
        .iter()
        .zip(counts)
        .zip(shares)
        .map(|((entry, click_count), share_percent)| DomainShare {
            domain: text_field(entry, &["domain", "name"]).unwrap_or_default(),
            click_count,
            share_percent,
            category: text_field(entry, &["category"]).unwrap_or_default(),
        })
        .collect()
}

/// `trend.topCategories` with display metadata.
pub fn derive_category_distribution(trend: &Trend) -> Vec<CategorySlice> {
    array_at(&trend.0, &["topCategories"])
        .iter()
        .map(|entry| {
            let key = text_field(entry, &["category", "key", "name"]).unwrap_or_default();
            let style = category_style(&key);
            let display_label = if style == OTHER_STYLE && !key.trim().is_empty() {
                key.clone()
            } else {
                style.label.to_string()
            };
            CategorySlice {
                category_key: if key.is_empty() { style.key.to_string() } else { key },
                display_label,
                icon: style.icon,
                color_token: style.color_token,
                click_count_label: format_count(count_field(entry, &["clicks", "count"])),
            }
        })
        .collect()
}

/// `1234` → `1.2K`; below a thousand the plain integer.
pub fn format_count(n: u64) -> String {
    if n >= 1000 {
        format!("{:.1}K", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}

/// Bar tier from the ratio of `clicks` to the series maximum.
pub fn color_tier(clicks: u64, max: u64) -> ColorTier {
    let max = if max == 0 { 1 } else { max };
    let ratio = clicks as f64 / max as f64;
    if ratio >= HIGH_RATIO {
        ColorTier::High
    } else if ratio >= MEDIUM_RATIO {
        ColorTier::Medium
    } else {
        ColorTier::Low
    }
}

pub fn derive_chart_bars(series: &[TimeBucket]) -> Vec<ChartBar> {
    let max = series.iter().map(|b| b.click_count).max().unwrap_or(1);
    series
        .iter()
        .map(|bucket| {
            let tier = color_tier(bucket.click_count, max);
            ChartBar {
                hour_label: bucket.hour_label.clone(),
                click_count: bucket.click_count,
                tier,
                color: tier.color(),
            }
        })
        .collect()
}
