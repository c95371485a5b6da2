use std::sync::Arc;

use super::draft::LeadDraft;
use super::schema::FormSchema;
use super::validation::{validate_fields, FieldError};

/// Advance refused because the current step still has invalid fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step {step} has {} invalid field(s)", .errors.len())]
pub struct StepBlocked {
    pub step: usize,
    pub errors: Vec<FieldError>,
}

/// Cursor over a form's ordered steps. Forward moves are gated on the current step's fields.
#[derive(Debug, Clone)]
pub struct StepGate {
    schema: Arc<FormSchema>,
    cursor: usize,
}

impl StepGate {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self { schema, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn step_count(&self) -> usize {
        self.schema.step_count()
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.step_count()
    }

    pub fn step_name(&self) -> Option<&'static str> {
        self.schema.step(self.cursor).map(|step| step.name)
    }

    /// Field errors for `step`; empty when the step passes.
    pub fn check(&self, step: usize, draft: &LeadDraft) -> Vec<FieldError> {
        match self.schema.step(step) {
            Some(descriptor) => validate_fields(&descriptor.fields, draft),
            None => Vec::new(),
        }
    }

    pub fn can_advance(&self, draft: &LeadDraft) -> bool {
        self.check(self.cursor, draft).is_empty()
    }

    /// Move forward one step when the current step validates. The last step stays put.
    pub fn advance(&mut self, draft: &LeadDraft) -> Result<usize, StepBlocked> {
        let errors = self.check(self.cursor, draft);
        if !errors.is_empty() {
            return Err(StepBlocked {
                step: self.cursor,
                errors,
            });
        }

        if !self.is_last() {
            self.cursor += 1;
        }
        Ok(self.cursor)
    }

    pub fn retreat(&mut self) -> usize {
        self.cursor = self.cursor.saturating_sub(1);
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
