use serde::Serialize;

use crate::errors::AppError;

/// Request lifecycle of a data-bound panel: `Idle → Loading → Ready | Failed`.
///
/// A panel fetches once; there is no transition out of `Ready` or `Failed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Lifecycle<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Lifecycle<T> {
    /// Move `Idle → Loading`. Returns false if the panel has already started.
    pub fn begin(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Loading;
                true
            }
            _ => false,
        }
    }

    /// Move `Loading → Ready | Failed`. Ignored in any other state.
    pub fn settle(&mut self, result: Result<T, AppError>) {
        if !matches!(self, Self::Loading) {
            return;
        }
        *self = match result {
            Ok(view) => Self::Ready(view),
            Err(e) => Self::Failed(e.to_string()),
        };
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
