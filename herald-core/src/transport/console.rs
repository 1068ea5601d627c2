//! Console transport for development

use super::provider::{Transport, TransportError};
use crate::domain::Message;
use async_trait::async_trait;

/// Transport that logs messages instead of sending them.
///
/// Accepts every channel, which makes it usable for SMS during development.
#[derive(Debug, Default)]
pub struct ConsoleTransport;

impl ConsoleTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        let recipients: Vec<&str> = message.recipients().iter().map(|r| r.as_str()).collect();
        let attachments: Vec<&str> = message.attachments().iter().map(|a| a.name()).collect();

        tracing::info!(
            channel = %message.channel(),
            to = ?recipients,
            subject = %message.subject(),
            format = ?message.format(),
            attachments = ?attachments,
            bytes = message.attachment_bytes(),
            "Message delivered to console"
        );
        tracing::debug!(body = %message.body(), "Console message body");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyFormat, Channel, Recipient};

    #[tokio::test]
    async fn test_console_accepts_any_channel() {
        let transport = ConsoleTransport::new();
        for channel in [Channel::Email, Channel::Sms] {
            let message = Message::new(
                channel,
                vec![Recipient::new("+4712345678".to_string())],
                "Code".to_string(),
                "Your code is 1234".to_string(),
                BodyFormat::Plain,
                vec![],
            );
            assert!(transport.send(&message).await.is_ok());
        }
        assert_eq!(transport.name(), "console");
    }
}
