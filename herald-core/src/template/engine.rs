//! Placeholder substitution
//!
//! Placeholders are written as `{{name}}` (inner whitespace allowed).
//! Substitution is single-pass: substituted values are never scanned again.

use crate::domain::TemplateContext;
use crate::error::{DispatchError, Result};
use regex::{Captures, Regex};

lazy_static::lazy_static! {
    /// Matches `{{ key }}` and captures the key
    pub static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").unwrap();
}

/// What to do with a placeholder that has no value in the context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderPolicy {
    /// Leave the marker in the output verbatim
    #[default]
    Lenient,
    /// Fail with [`DispatchError::UnresolvedPlaceholder`]
    Strict,
}

/// Template rendering engine with variable substitution
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine {
    policy: PlaceholderPolicy,
}

impl TemplateEngine {
    pub fn new(policy: PlaceholderPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PlaceholderPolicy {
        self.policy
    }

    /// Substitute placeholders in a single line, leaving unknown ones as-is
    pub fn render_line(&self, line: &str, context: &TemplateContext) -> String {
        PLACEHOLDER_REGEX
            .replace_all(line, |caps: &Captures<'_>| match context.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render template source lines and join them into one payload.
    ///
    /// Lines keep their original order and are joined with `\n`.
    pub fn render(
        &self,
        template_id: &str,
        lines: &[String],
        context: &TemplateContext,
    ) -> Result<String> {
        if self.policy == PlaceholderPolicy::Strict {
            if let Some(placeholder) = first_unresolved(lines, context) {
                return Err(DispatchError::UnresolvedPlaceholder {
                    template: template_id.to_string(),
                    placeholder,
                });
            }
        }

        let rendered: Vec<String> = lines
            .iter()
            .map(|line| self.render_line(line, context))
            .collect();

        Ok(rendered.join("\n"))
    }
}

fn first_unresolved(lines: &[String], context: &TemplateContext) -> Option<String> {
    lines.iter().find_map(|line| {
        PLACEHOLDER_REGEX
            .captures_iter(line)
            .map(|caps| caps[1].to_string())
            .find(|key| context.get(key).is_none())
    })
}
