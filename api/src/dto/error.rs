//! Error response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform error body: a stable machine code plus a human message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code, e.g. "INVALID_CREDENTIALS"
    pub error: String,
    pub message: String,

    /// Login attempts left before lockout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,

    /// When a locked account unlocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            attempts_remaining: None,
            locked_until: None,
        }
    }

    pub fn with_attempts_remaining(mut self, remaining: u32) -> Self {
        self.attempts_remaining = Some(remaining);
        self
    }

    pub fn with_locked_until(mut self, until: DateTime<Utc>) -> Self {
        self.locked_until = Some(until);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted() {
        let body = ErrorResponse::new("TOKEN_EXPIRED", "Token expired");
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("attempts_remaining"));
        assert!(!json.contains("locked_until"));
    }
}
