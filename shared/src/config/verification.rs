//! Verification subsystem configuration

use serde::{Deserialize, Serialize};

/// Configuration for the phone verification flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes until a verification code expires
    pub code_ttl_minutes: i64,

    /// SMS body template; the `{code}` placeholder is replaced with the
    /// generated verification code before delivery
    pub message_template: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: 10,
            message_template: "【榮泰速遞】您的驗證碼是 {code}，10 分鐘內有效，請勿洩露給他人。"
                .to_string(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_ttl_minutes: std::env::var("VERIFICATION_CODE_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl_minutes),
            message_template: std::env::var("VERIFICATION_MESSAGE_TEMPLATE")
                .unwrap_or(defaults.message_template),
        }
    }

    /// Render the SMS body for a given code
    pub fn render_message(&self, code: &str) -> String {
        self.message_template.replace("{code}", code)
    }
}
