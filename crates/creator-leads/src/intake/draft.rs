use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use super::domain::LeadKind;
use super::schema::{FieldKind, FormSchema};

/// Raw value held by a draft field before validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Tags(BTreeSet<String>),
    Flag(bool),
}

impl FieldValue {
    /// Keep whatever shape the caller sent; the validator reports mismatches.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(FieldValue::Text(text.clone())),
            Value::Number(number) => number.as_f64().map(FieldValue::Number),
            Value::Bool(flag) => Some(FieldValue::Flag(*flag)),
            Value::Array(items) => {
                let mut tags = BTreeSet::new();
                for item in items {
                    match item {
                        Value::String(tag) => {
                            tags.insert(tag.clone());
                        }
                        other => return Some(FieldValue::Text(other.to_string())),
                    }
                }
                Some(FieldValue::Tags(tags))
            }
            Value::Object(_) => Some(FieldValue::Text(value.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("draft payload must be a JSON object")]
    NotAnObject,
}

/// Mutable form state edited by the submitter until it is submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadDraft {
    values: BTreeMap<String, FieldValue>,
}

impl LeadDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-selected values the form opens with.
    pub fn with_defaults(kind: LeadKind, brand_minimum_budget: f64) -> Self {
        let mut draft = Self::new();
        if kind == LeadKind::Brand {
            draft.set_text("videoType", "dedicated");
            draft.set_text("productType", "digital");
            draft.set_number("estimatedBudget", brand_minimum_budget);
            draft.set_text("paymentMethod", "upi");
            draft.set_flag("termsAgreed", false);
        }
        draft
    }

    /// Hydrate a draft from a submitted JSON object, keeping only fields the schema declares.
    pub fn from_json(schema: &FormSchema, payload: &Value) -> Result<Self, DraftError> {
        let object = payload.as_object().ok_or(DraftError::NotAnObject)?;
        let mut draft = Self::new();

        for field in schema.fields() {
            let Some(value) = object.get(field.name).and_then(FieldValue::from_json) else {
                continue;
            };

            let value = match (&field.kind, value) {
                (FieldKind::Budget { .. }, FieldValue::Text(raw)) => {
                    FieldValue::Number(coerce_number(&raw))
                }
                (FieldKind::Budget { .. }, FieldValue::Number(number)) if !number.is_finite() => {
                    FieldValue::Number(0.0)
                }
                (_, value) => value,
            };
            draft.values.insert(field.name.to_string(), value);
        }

        Ok(draft)
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_number(&mut self, name: &str, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        self.values
            .insert(name.to_string(), FieldValue::Number(value));
    }

    /// Keystroke entry for numeric fields: non-numeric input becomes 0.
    pub fn set_number_input(&mut self, name: &str, raw: &str) {
        self.set_number(name, coerce_number(raw));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.values.insert(name.to_string(), FieldValue::Flag(value));
    }

    pub fn toggle_tag(&mut self, name: &str, tag: &str, selected: bool) {
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| FieldValue::Tags(BTreeSet::new()));
        if !matches!(entry, FieldValue::Tags(_)) {
            *entry = FieldValue::Tags(BTreeSet::new());
        }
        if let FieldValue::Tags(tags) = entry {
            if selected {
                tags.insert(tag.to_string());
            } else {
                tags.remove(tag);
            }
        }
    }

    pub fn clear(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text value, or the empty string when missing or not text.
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        let trimmed = self.text(name).trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn number(&self, name: &str) -> f64 {
        match self.values.get(name) {
            Some(FieldValue::Number(number)) => *number,
            _ => 0.0,
        }
    }

    pub fn tags(&self, name: &str) -> BTreeSet<String> {
        match self.values.get(name) {
            Some(FieldValue::Tags(tags)) => tags.clone(),
            _ => BTreeSet::new(),
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(FieldValue::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse a numeric entry, falling back to the 0 sentinel.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
