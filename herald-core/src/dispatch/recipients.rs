//! Recipient normalization

use crate::domain::{Channel, Recipient, Recipients};
use crate::error::{DispatchError, Result};
use std::collections::HashSet;
use validator::ValidateEmail;

lazy_static::lazy_static! {
    /// Phone number after separators are stripped: optional `+`, 5 to 15 digits
    pub static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+?[0-9]{5,15}$").unwrap();
}

/// Validate and deduplicate recipients, keeping first-occurrence order.
///
/// Addresses are trimmed; SMS numbers additionally lose spaces, dashes and
/// parentheses, so `+47 123-45 678` and `+4712345678` are the same recipient.
pub fn normalize(channel: Channel, input: &Recipients) -> Result<Vec<Recipient>> {
    if input.is_empty() {
        return Err(DispatchError::InvalidRecipient(
            "no recipients given".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(input.len());
    let mut recipients = Vec::with_capacity(input.len());

    for raw in input.iter() {
        let address = canonicalize(channel, raw)?;
        if seen.insert(address.clone()) {
            recipients.push(Recipient::new(address));
        }
    }

    Ok(recipients)
}

fn canonicalize(channel: Channel, raw: &str) -> Result<String> {
    let address = raw.trim();
    if address.is_empty() {
        return Err(DispatchError::InvalidRecipient(
            "empty address".to_string(),
        ));
    }

    match channel {
        Channel::Email => {
            if address.validate_email() {
                Ok(address.to_string())
            } else {
                Err(DispatchError::InvalidRecipient(address.to_string()))
            }
        }
        Channel::Sms => {
            let number: String = address
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
                .collect();
            if PHONE_REGEX.is_match(&number) {
                Ok(number)
            } else {
                Err(DispatchError::InvalidRecipient(address.to_string()))
            }
        }
    }
}
