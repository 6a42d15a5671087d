use serde::Deserialize;

use crate::enums::PeriodKey;

/// All configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the remote gateway (`/shorten`, `/ai/latest`).
    #[serde(default)]
    pub api_gateway_url: Option<String>,
    /// Serve mock data when no gateway is configured.
    #[serde(default)]
    pub demo_mode: bool,
    #[serde(default)]
    pub default_period: Option<String>,
}

fn default_app_name() -> String {
    "shortify-web".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env::<Self>()?)
    }

    /// Gateway base URL with surrounding whitespace and trailing slashes removed.
    /// An empty value counts as not configured.
    pub fn gateway_base_url(&self) -> Option<String> {
        normalize_base_url(self.api_gateway_url.as_deref())
    }

    pub fn default_period(&self) -> PeriodKey {
        self.default_period
            .as_deref()
            .and_then(PeriodKey::parse)
            .unwrap_or_default()
    }
}

pub fn normalize_base_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
