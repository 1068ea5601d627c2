//! Message composition

use crate::domain::{Attachment, BodyFormat, Channel, Message, Recipient};

/// Merge the parts of a dispatch into one immutable [`Message`].
///
/// Body precedence:
/// - plain body and rendered template: `plain + "\n" + rendered`, HTML
/// - rendered template only: the rendered output, HTML
/// - plain body only: the plain body, plain text
/// - neither: empty plain text body
///
/// An empty plain body counts as absent.
pub fn compose(
    channel: Channel,
    recipients: Vec<Recipient>,
    subject: impl Into<String>,
    plain_body: Option<&str>,
    rendered: Option<String>,
    attachments: Vec<Attachment>,
) -> Message {
    let plain_body = plain_body.filter(|body| !body.is_empty());

    let (body, format) = match (plain_body, rendered) {
        (Some(fallback), Some(rendered)) => {
            (format!("{}\n{}", fallback, rendered), BodyFormat::Html)
        }
        (None, Some(rendered)) => (rendered, BodyFormat::Html),
        (Some(plain), None) => (plain.to_string(), BodyFormat::Plain),
        (None, None) => (String::new(), BodyFormat::Plain),
    };

    Message::new(
        channel,
        recipients,
        subject.into(),
        body,
        format,
        attachments,
    )
}
