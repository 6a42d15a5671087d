use serde::Serialize;

use crate::errors::AppError;
use crate::gateway::{short_link, LinkGateway};
use crate::validator::validate_input;

/// What the user gets back after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenOutcome {
    pub short_link: String,
    pub short_id: String,
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// `Idle → Submitting → Done | Failed`, plus `reset` back to `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Done(ShortenOutcome),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ShortenForm {
    input: String,
    state: FormState,
}

impl ShortenForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn outcome(&self) -> Option<&ShortenOutcome> {
        match &self.state {
            FormState::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Input is locked while submitting and once a result is shown.
    pub fn is_locked(&self) -> bool {
        matches!(self.state, FormState::Submitting | FormState::Done(_))
    }

    /// Editing the input clears a pending error.
    pub fn set_input(&mut self, value: impl Into<String>) {
        if self.is_locked() {
            return;
        }
        self.input = value.into();
        if matches!(self.state, FormState::Failed(_)) {
            self.state = FormState::Idle;
        }
    }

    /// Validate, then call the gateway. Invalid input never reaches the network.
    pub async fn submit(&mut self, gateway: &dyn LinkGateway) -> Result<ShortenOutcome, AppError> {
        if let FormState::Done(outcome) = &self.state {
            return Ok(outcome.clone());
        }
        if matches!(self.state, FormState::Submitting) {
            return Err(AppError::Validation("A request is already in flight.".to_string()));
        }

        let url = match validate_input(&self.input) {
            Ok(url) => url,
            Err(e) => {
                self.state = FormState::Failed(e.to_string());
                return Err(e);
            }
        };

        self.state = FormState::Submitting;
        match gateway.shorten_url(&url).await {
            Ok(resp) => {
                let outcome = ShortenOutcome {
                    short_link: short_link(gateway.link_base(), &resp),
                    short_id: resp.short_id.trim().to_string(),
                    original_url: resp.original_url.unwrap_or(url),
                    title: resp.title,
                };
                tracing::info!(short_id = %outcome.short_id, gateway = gateway.name(), "url shortened");
                self.state = FormState::Done(outcome.clone());
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, gateway = gateway.name(), "shorten failed");
                self.state = FormState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Back to an empty form.
    pub fn reset(&mut self) {
        self.input.clear();
        self.state = FormState::Idle;
    }
}
