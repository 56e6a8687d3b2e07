// Form bodies and boundary validation
//
// Hard limits, not configurable. Every form field is optional at the serde
// level so a missing field becomes a validation error (400) instead of an
// extractor rejection.

use cannanote_core::{CannaError, EntryFields, Result};
use regex::Regex;
use serde::Deserialize;

use crate::services::Credentials;

// =============================================================================
// Input Size Limits
// =============================================================================

pub const MAX_STRAIN_BYTES: usize = 256;
pub const MAX_KIND_BYTES: usize = 64;
pub const MAX_AMOUNT_BYTES: usize = 64;
pub const MAX_CONSUMPTION_BYTES: usize = 128;
pub const MAX_DESCRIPTION_BYTES: usize = 10 * 1024; // 10 KB
pub const MAX_TAG_BYTES: usize = 64;
pub const MAX_TAGS: usize = 32;
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Entry form as posted by the new/edit pages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntryForm {
    pub strain: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub consumption: String,
    pub description: String,
    /// Comma-separated
    pub tags: String,
}

impl EntryForm {
    pub fn validate(self) -> Result<EntryFields> {
        let strain = required("strain", &self.strain, MAX_STRAIN_BYTES)?;
        let amount = required("amount", &self.amount, MAX_AMOUNT_BYTES)?;
        let kind = optional("type", &self.kind, MAX_KIND_BYTES)?;
        let consumption = optional("consumption", &self.consumption, MAX_CONSUMPTION_BYTES)?;
        let description = optional("description", &self.description, MAX_DESCRIPTION_BYTES)?;
        let tags = parse_tags(&self.tags)?;

        Ok(EntryFields {
            strain,
            kind,
            amount,
            consumption,
            description,
            tags,
        })
    }
}

/// Split a comma-separated tag list, dropping empty items
pub fn parse_tags(raw: &str) -> Result<Vec<String>> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if tags.len() > MAX_TAGS {
        return Err(CannaError::validation(format!(
            "at most {MAX_TAGS} tags allowed"
        )));
    }
    if tags.iter().any(|t| t.len() > MAX_TAG_BYTES) {
        return Err(CannaError::validation("tag too long"));
    }
    Ok(tags)
}

fn required(field: &str, value: &str, max: usize) -> Result<String> {
    let value = optional(field, value, max)?;
    if value.is_empty() {
        return Err(CannaError::validation(format!("{field} is required")));
    }
    Ok(value)
}

fn optional(field: &str, value: &str, max: usize) -> Result<String> {
    let value = value.trim();
    if value.len() > max {
        return Err(CannaError::validation(format!("{field} is too long")));
    }
    Ok(value.to_string())
}

/// Signup and login form
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_.-]{1,64}$";

impl CredentialsForm {
    /// Username keeps its case; surrounding whitespace is dropped.
    /// The password is taken verbatim.
    pub fn validate(self) -> Result<Credentials> {
        let pattern =
            Regex::new(USERNAME_PATTERN).map_err(|e| CannaError::internal(e.to_string()))?;
        let username = self.username.trim();
        if !pattern.is_match(username) {
            return Err(CannaError::validation(
                "username must be 1-64 letters, digits, '_', '.' or '-'",
            ));
        }
        if self.password.is_empty() {
            return Err(CannaError::validation("password is required"));
        }
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(CannaError::validation("password is too long"));
        }

        Ok(Credentials {
            username: username.to_string(),
            password: self.password,
        })
    }
}
