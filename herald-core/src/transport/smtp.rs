//! SMTP transport implementation using lettre

use super::provider::{Transport, TransportError};
use crate::config::SmtpConfig;
use crate::domain::{BodyFormat, Channel, Message};
use async_trait::async_trait;
use lettre::{
    message::{
        header::ContentType, Attachment as MailAttachment, Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
};

/// SMTP-based transport for the email channel
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    from_name: Option<String>,
}

impl SmtpTransport {
    /// Create a new SMTP transport from configuration
    pub fn from_config(config: &SmtpConfig) -> Result<Self, TransportError> {
        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| TransportError::Connection(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let credentials = Credentials::new(username.clone(), password.clone());
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        })
    }

    fn build_from_mailbox(&self) -> Result<Mailbox, TransportError> {
        let mailbox = if let Some(name) = &self.from_name {
            format!("{} <{}>", name, self.from_email)
        } else {
            self.from_email.clone()
        };

        mailbox
            .parse()
            .map_err(|e| TransportError::InvalidMessage(format!("Invalid from address: {}", e)))
    }

    /// Translate a composed message into a MIME email.
    ///
    /// Without attachments the body is a single part; with attachments it is
    /// `multipart/mixed` with the body first and attachments in order.
    fn build_email(&self, message: &Message) -> Result<Email, TransportError> {
        if message.channel() != Channel::Email {
            return Err(TransportError::UnsupportedChannel(
                message.channel().to_string(),
            ));
        }

        if message.recipients().is_empty() {
            return Err(TransportError::InvalidMessage(
                "No recipients specified".to_string(),
            ));
        }

        let mut builder = Email::builder()
            .from(self.build_from_mailbox()?)
            .subject(message.subject());

        for recipient in message.recipients() {
            let mailbox: Mailbox = recipient.as_str().parse().map_err(|e| {
                TransportError::InvalidMessage(format!("Invalid to address: {}", e))
            })?;
            builder = builder.to(mailbox);
        }

        let body = match message.format() {
            BodyFormat::Plain => SinglePart::plain(message.body().to_string()),
            BodyFormat::Html => SinglePart::html(message.body().to_string()),
        };

        let email = if message.attachments().is_empty() {
            builder.singlepart(body)
        } else {
            let mut mixed = MultiPart::mixed().singlepart(body);
            for attachment in message.attachments() {
                let content_type = ContentType::parse(attachment.content_type()).map_err(|e| {
                    TransportError::InvalidMessage(format!(
                        "Invalid content type '{}': {}",
                        attachment.content_type(),
                        e
                    ))
                })?;
                mixed = mixed.singlepart(
                    MailAttachment::new(attachment.name().to_string())
                        .body(attachment.content().to_vec(), content_type),
                );
            }
            builder.multipart(mixed)
        };

        email.map_err(|e| TransportError::InvalidMessage(e.to_string()))
    }
}

/// Map a lettre SMTP error onto the transport error kinds.
///
/// 530, 534 and 535 replies are authentication failures; any other relay
/// reply (4xx or 5xx) is a send failure. Timeouts and errors raised before
/// the relay answered are connection errors.
fn classify_error(error: &lettre::transport::smtp::Error) -> TransportError {
    let message = error.to_string();

    if error.is_timeout() {
        return TransportError::Connection(message);
    }

    if error.is_permanent() || error.is_transient() {
        let code = error.status().map(|code| code.to_string());
        return match code.as_deref() {
            Some("530" | "534" | "535") => TransportError::Authentication(message),
            _ => TransportError::SendFailed(message),
        };
    }

    TransportError::Connection(message)
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        let email = self.build_email(message)?;

        match self.transport.send(email).await {
            Ok(response) => {
                let reply = response.message().next().map(|s| s.to_string());
                tracing::debug!(reply = ?reply, "SMTP relay accepted message");
                Ok(())
            }
            Err(e) => Err(classify_error(&e)),
        }
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attachment, Recipient};

    fn test_smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            use_tls: false,
            from_email: "sender@example.com".to_string(),
            from_name: Some("Test Sender".to_string()),
        }
    }

    fn message(channel: Channel, format: BodyFormat, attachments: Vec<Attachment>) -> Message {
        Message::new(
            channel,
            vec![
                Recipient::new("a@example.com".to_string()),
                Recipient::new("b@example.com".to_string()),
            ],
            "Quarterly report".to_string(),
            "<p>See attached</p>".to_string(),
            format,
            attachments,
        )
    }

    #[test]
    fn test_smtp_transport_creation() {
        let transport = SmtpTransport::from_config(&test_smtp_config()).unwrap();
        assert_eq!(transport.name(), "smtp");
    }

    #[test]
    fn test_smtp_transport_with_auth() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: Some("user@example.com".to_string()),
            password: Some("password".to_string()),
            use_tls: true,
            from_email: "noreply@example.com".to_string(),
            from_name: None,
        };

        assert!(SmtpTransport::from_config(&config).is_ok());
    }

    #[test]
    fn test_build_from_mailbox() {
        let transport = SmtpTransport::from_config(&test_smtp_config()).unwrap();
        let mailbox = transport.build_from_mailbox().unwrap();
        assert_eq!(mailbox.email.to_string(), "sender@example.com");
        assert_eq!(mailbox.name.as_deref(), Some("Test Sender"));
    }

    #[test]
    fn test_build_email_plain() {
        let transport = SmtpTransport::from_config(&test_smtp_config()).unwrap();
        let email = transport
            .build_email(&message(Channel::Email, BodyFormat::Plain, vec![]))
            .unwrap();

        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("a@example.com"));
        assert!(raw.contains("b@example.com"));
        assert!(raw.contains("Quarterly report"));
        assert!(raw.contains("text/plain"));
    }

    #[test]
    fn test_build_email_with_attachment() {
        let transport = SmtpTransport::from_config(&test_smtp_config()).unwrap();
        let attachment = Attachment::new("report.txt", b"numbers".to_vec(), "text/plain");
        let email = transport
            .build_email(&message(Channel::Email, BodyFormat::Html, vec![attachment]))
            .unwrap();

        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("report.txt"));
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_connection_error() {
        let config = SmtpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..test_smtp_config()
        };
        let transport = SmtpTransport::from_config(&config).unwrap();

        let result = transport
            .send(&message(Channel::Email, BodyFormat::Plain, vec![]))
            .await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }

    #[test]
    fn test_build_email_rejects_sms_channel() {
        let transport = SmtpTransport::from_config(&test_smtp_config()).unwrap();
        let result = transport.build_email(&message(Channel::Sms, BodyFormat::Plain, vec![]));
        assert!(matches!(result, Err(TransportError::UnsupportedChannel(c)) if c == "sms"));
    }
}
