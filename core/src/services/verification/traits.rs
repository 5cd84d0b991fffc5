//! Trait for SMS delivery integration

use async_trait::async_trait;

/// Outbound SMS delivery channel.
///
/// The destination is already in the provider's expected international
/// format when this trait is called; the verification service performs
/// that conversion. Provider-side rejections are reported through the
/// `Err` variant with a reason string, never by panicking.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Deliver a rendered message body, returning the provider message id
    /// on confirmed acceptance
    async fn send(&self, phone_e164: &str, body: &str) -> Result<String, String>;
}
