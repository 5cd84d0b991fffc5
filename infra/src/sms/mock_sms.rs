//! Mock SMS gateway for development and local testing
//!
//! Delivers nothing: messages are logged and retained in memory so a
//! developer can read the code without provider credentials or SMS fees.

use async_trait::async_trait;
use std::sync::Mutex;

use rt_core::services::verification::SmsGateway;
use rt_shared::utils::phone::mask_phone_number;

/// In-memory SMS gateway that records every message instead of sending it
pub struct MockSmsGateway {
    sent: Mutex<Vec<(String, String)>>,
}

impl MockSmsGateway {
    /// Create a new mock gateway
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages delivered so far as (destination, body) pairs
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockSmsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send(&self, phone_e164: &str, body: &str) -> Result<String, String> {
        tracing::info!(
            phone = %mask_phone_number(phone_e164),
            body = %body,
            event = "mock_sms_sent",
            "Mock SMS gateway captured message"
        );

        let mut sent = self.sent.lock().unwrap();
        sent.push((phone_e164.to_string(), body.to_string()));
        Ok(format!("mock-{}", sent.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_records_messages() {
        let gateway = MockSmsGateway::new();

        let id = gateway
            .send("+886912345678", "Your code is 123456")
            .await
            .unwrap();
        assert_eq!(id, "mock-1");

        let sent = gateway.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+886912345678");
        assert!(sent[0].1.contains("123456"));
    }
}
