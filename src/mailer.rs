//! Email delivery capability
//!
//! The handler talks to an injected [`Mailer`] so its validation and
//! response-shaping logic can be tested without a live network dependency.
//! The production implementation posts to a Resend-compatible HTTPS API.

use async_trait::async_trait;
use serde::Serialize;

/// One outbound email, ready for the provider.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug)]
pub enum MailError {
    /// Transport-level failure (connect, TLS, timeout).
    Http(reqwest::Error),
    /// The provider answered with a non-success status.
    Rejected { status: u16, body: String },
}

impl std::fmt::Display for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "email request failed: {e}"),
            Self::Rejected { status, body } => {
                write!(f, "email provider rejected request ({status}): {body}")
            }
        }
    }
}

impl std::error::Error for MailError {}

impl From<reqwest::Error> for MailError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Mailer backed by the Resend HTTPS API.
pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_includes_reply_to_when_present() {
        let email = OutboundEmail {
            from: "Contact Form <noreply@example.com>".to_string(),
            to: vec!["owner@example.com".to_string()],
            subject: "New Business Inquiry from Jane".to_string(),
            html: "<p>Hi</p>".to_string(),
            reply_to: Some("jane@x.com".to_string()),
        };

        let value = serde_json::to_value(&email).unwrap();
        assert_eq!(value["to"][0], "owner@example.com");
        assert_eq!(value["reply_to"], "jane@x.com");
    }

    #[test]
    fn test_payload_omits_reply_to_when_absent() {
        let email = OutboundEmail {
            from: "Contact Form <noreply@example.com>".to_string(),
            to: vec!["jane@x.com".to_string()],
            subject: "We received your message".to_string(),
            html: "<p>Thanks</p>".to_string(),
            reply_to: None,
        };

        let value = serde_json::to_value(&email).unwrap();
        assert!(value.get("reply_to").is_none());
    }
}
