use serde::Serialize;

use super::draft::{FieldValue, LeadDraft};
use super::schema::{FieldDescriptor, FieldKind, FormSchema};

/// Result of checking one field against its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// Field-level failure rendered inline next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Check a single field by name. Unknown names are reported, never panicked on.
pub fn validate_field(schema: &FormSchema, draft: &LeadDraft, name: &str) -> Validation {
    match schema.field(name) {
        Some(descriptor) => validate_descriptor(descriptor, draft),
        None => Validation::Invalid(format!("unknown field '{name}'")),
    }
}

pub fn validate_fields<'a, I>(fields: I, draft: &LeadDraft) -> Vec<FieldError>
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    fields
        .into_iter()
        .filter_map(|descriptor| match validate_descriptor(descriptor, draft) {
            Validation::Valid => None,
            Validation::Invalid(reason) => Some(FieldError::new(descriptor.name, reason)),
        })
        .collect()
}

pub fn validate_all(schema: &FormSchema, draft: &LeadDraft) -> Vec<FieldError> {
    validate_fields(schema.fields(), draft)
}

pub fn validate_descriptor(descriptor: &FieldDescriptor, draft: &LeadDraft) -> Validation {
    let value = draft.get(descriptor.name);
    let passes = match (&descriptor.kind, value) {
        (FieldKind::OptionalText, None) => true,
        (FieldKind::OptionalText, Some(FieldValue::Text(_))) => true,
        (FieldKind::Url { required: false }, None) => true,
        (FieldKind::Url { required }, Some(FieldValue::Text(text))) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                !required
            } else {
                is_web_url(trimmed)
            }
        }
        (FieldKind::Text { min_len }, Some(FieldValue::Text(text))) => {
            text.trim().chars().count() >= *min_len
        }
        (FieldKind::Email, Some(FieldValue::Text(text))) => is_email(text.trim()),
        (FieldKind::Phone { min_len }, Some(FieldValue::Text(text))) => {
            is_phone(text.trim(), *min_len)
        }
        (FieldKind::Choice { options }, Some(FieldValue::Text(text))) => {
            options.iter().any(|option| *option == text.as_str())
        }
        (FieldKind::Tags { options }, Some(FieldValue::Tags(tags))) => {
            !tags.is_empty()
                && tags
                    .iter()
                    .all(|tag| options.iter().any(|option| *option == tag.as_str()))
        }
        (FieldKind::Budget { minimum }, Some(FieldValue::Number(amount))) => {
            amount.is_finite() && *amount > 0.0 && *amount >= *minimum
        }
        (FieldKind::Consent, Some(FieldValue::Flag(agreed))) => *agreed,
        _ => false,
    };

    if passes {
        Validation::Valid
    } else {
        Validation::Invalid(reason_for(descriptor))
    }
}

fn reason_for(descriptor: &FieldDescriptor) -> String {
    match &descriptor.kind {
        FieldKind::Budget { minimum } => {
            format!("{} Minimum is ${minimum:.0}.", descriptor.message)
        }
        _ => descriptor.message.to_string(),
    }
}

fn is_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn is_phone(candidate: &str, min_len: usize) -> bool {
    let allowed = candidate
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    allowed && digits > 0 && candidate.chars().count() >= min_len
}

fn is_web_url(candidate: &str) -> bool {
    match url::Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
