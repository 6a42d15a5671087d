//! Input URL validation for the shorten form.

use url::Url;

use crate::errors::AppError;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a URL.";
pub const INVALID_URL_MESSAGE: &str = "That is not a valid URL.";

/// True only for absolute URLs whose scheme is exactly `http` or `https`.
pub fn is_shortenable(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Trim the raw form input and return it if it can be shortened.
pub fn validate_input(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
    }
    if !is_shortenable(trimmed) {
        return Err(AppError::Validation(INVALID_URL_MESSAGE.to_string()));
    }
    Ok(trimmed.to_string())
}
