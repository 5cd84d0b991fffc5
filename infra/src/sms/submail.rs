//! SUBMAIL SMS gateway implementation
//!
//! Sends verification messages through the SUBMAIL HTTP API. Credentials
//! are required at construction time so a misconfigured deployment fails
//! at startup instead of on the first verification request. Provider
//! rejections and transport failures are reported as delivery failures,
//! never as panics.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use rt_core::services::verification::SmsGateway;
use rt_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

const DEFAULT_ENDPOINT: &str = "https://api-v4.mysubmail.com/sms/send.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// SUBMAIL gateway configuration
#[derive(Debug, Clone)]
pub struct SubmailConfig {
    /// SUBMAIL application id
    pub app_id: String,
    /// SUBMAIL application key, sent as the request signature
    pub app_key: String,
    /// Send endpoint URL
    pub endpoint: String,
    /// Timeout budget for a single provider request, in seconds
    pub request_timeout_secs: u64,
}

impl SubmailConfig {
    /// Create configuration from environment variables.
    ///
    /// `SUBMAIL_APP_ID` and `SUBMAIL_APP_KEY` are required.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let app_id = std::env::var("SUBMAIL_APP_ID")
            .map_err(|_| InfrastructureError::Config("SUBMAIL_APP_ID not set".to_string()))?;
        let app_key = std::env::var("SUBMAIL_APP_KEY")
            .map_err(|_| InfrastructureError::Config("SUBMAIL_APP_KEY not set".to_string()))?;

        Ok(Self {
            app_id,
            app_key,
            endpoint: std::env::var("SUBMAIL_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            request_timeout_secs: std::env::var("SUBMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Response payload from the SUBMAIL send endpoint
#[derive(Debug, Deserialize)]
struct SubmailResponse {
    status: String,
    send_id: Option<String>,
    code: Option<i64>,
    msg: Option<String>,
}

/// SUBMAIL SMS gateway
pub struct SubmailSmsGateway {
    client: reqwest::Client,
    config: SubmailConfig,
}

impl SubmailSmsGateway {
    /// Create a new gateway, validating that credentials are present
    pub fn new(config: SubmailConfig) -> Result<Self, InfrastructureError> {
        if config.app_id.is_empty() || config.app_key.is_empty() {
            return Err(InfrastructureError::Config(
                "SUBMAIL credentials must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(
            endpoint = %config.endpoint,
            timeout_secs = config.request_timeout_secs,
            "SUBMAIL SMS gateway initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SubmailConfig::from_env()?)
    }
}

#[async_trait]
impl SmsGateway for SubmailSmsGateway {
    async fn send(&self, phone_e164: &str, body: &str) -> Result<String, String> {
        tracing::debug!(
            phone = %mask_phone_number(phone_e164),
            event = "sms_send_attempt",
            "Sending verification SMS via SUBMAIL"
        );

        let params = [
            ("appid", self.config.app_id.as_str()),
            ("signature", self.config.app_key.as_str()),
            ("to", phone_e164),
            ("content", body),
        ];

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| format!("SUBMAIL request failed: {}", e))?;

        let payload: SubmailResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed SUBMAIL response: {}", e))?;

        if payload.status == "success" {
            let send_id = payload.send_id.unwrap_or_else(|| "unknown".to_string());
            tracing::info!(
                phone = %mask_phone_number(phone_e164),
                event = "sms_sent",
                send_id = %send_id,
                "SUBMAIL accepted the message"
            );
            Ok(send_id)
        } else {
            let reason = format!(
                "SUBMAIL rejected the message (code {}): {}",
                payload.code.unwrap_or(-1),
                payload.msg.unwrap_or_else(|| "no detail".to_string())
            );
            tracing::warn!(
                phone = %mask_phone_number(phone_e164),
                event = "sms_rejected",
                reason = %reason,
                "SUBMAIL did not accept the message"
            );
            Err(reason)
        }
    }
}
