//! Composed message handed to a transport

use super::{Channel, Recipient};

/// Content type of the message body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Plain,
    Html,
}

/// A named binary part embedded in an outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    content: Vec<u8>,
    content_type: String,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content,
            content_type: content_type.into(),
        }
    }

    /// Display name (the base name of the source file)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Transport-ready message. Built once by the composer, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    channel: Channel,
    recipients: Vec<Recipient>,
    subject: String,
    body: String,
    format: BodyFormat,
    attachments: Vec<Attachment>,
}

impl Message {
    pub(crate) fn new(
        channel: Channel,
        recipients: Vec<Recipient>,
        subject: String,
        body: String,
        format: BodyFormat,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            channel,
            recipients,
            subject,
            body,
            format,
            attachments,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn format(&self) -> BodyFormat {
        self.format
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Total attachment payload in bytes
    pub fn attachment_bytes(&self) -> usize {
        self.attachments.iter().map(|a| a.content.len()).sum()
    }
}
