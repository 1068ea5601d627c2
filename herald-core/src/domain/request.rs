//! Dispatch request and receipt types

use super::{Channel, Recipients};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Placeholder name to substitution value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a placeholder, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Consuming variant of [`TemplateContext::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for TemplateContext {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A template identifier together with the values to render it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    pub id: String,
    pub context: TemplateContext,
}

/// One logical request to deliver a message to one or more recipients.
///
/// Template, attachments and plain body are all optional. When both a plain
/// body and a template are given, the plain body is placed before the
/// rendered template content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    channel: Channel,
    recipients: Recipients,
    subject: String,
    body: Option<String>,
    template: Option<TemplateRef>,
    attachments: Vec<PathBuf>,
}

impl DispatchRequest {
    pub fn new(recipients: impl Into<Recipients>, subject: impl Into<String>) -> Self {
        Self {
            channel: Channel::default(),
            recipients: recipients.into(),
            subject: subject.into(),
            body: None,
            template: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_template(mut self, id: impl Into<String>, context: TemplateContext) -> Self {
        self.template = Some(TemplateRef {
            id: id.into(),
            context,
        });
        self
    }

    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }

    pub fn with_attachments<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.attachments.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn recipients(&self) -> &Recipients {
        &self.recipients
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain body, treating an empty string as absent
    pub fn plain_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }

    pub fn template(&self) -> Option<&TemplateRef> {
        self.template.as_ref()
    }

    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }
}

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub dispatch_id: Uuid,
    pub recipients: usize,
    pub attachments: usize,
}
