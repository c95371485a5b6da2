use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::collaborators::{LeadStore, Notifier, ScoredLeadType, ScoringRequest};
use super::domain::{LeadAnalysis, LeadDocument, LeadId, LeadKind, LeadRecord};
use super::draft::{DraftError, LeadDraft};
use super::notifications::{admin_notification, submitter_confirmation};
use super::receipt::ReceiptArtifact;
use super::record::finalize;
use super::redirect::ScheduledRedirect;
use super::schema::FormSchema;
use super::scoring::checked_analysis;
use super::service::LeadIntakeService;
use super::steps::{StepBlocked, StepGate};
use super::tiers::TierPlacement;
use super::validation::FieldError;

/// Message shown when the lead could not be stored. Raw store errors stay in the logs.
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Lifecycle of one form instance's submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Persisting,
    Notifying,
    Succeeded { lead_id: LeadId },
    Failed { message: String },
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Persisting => "persisting",
            SubmissionState::Notifying => "notifying",
            SubmissionState::Succeeded { .. } => "succeeded",
            SubmissionState::Failed { .. } => "failed",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating | SubmissionState::Persisting | SubmissionState::Notifying
        )
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(SubmissionSuccess),
    /// Field errors; the session is back to idle and nothing was stored.
    Rejected(Vec<FieldError>),
    Failed { message: String },
    AlreadyInFlight,
    AlreadySubmitted,
}

#[derive(Debug)]
pub struct SubmissionSuccess {
    pub lead_id: LeadId,
    pub record: LeadRecord,
    pub message: &'static str,
    pub tier: Option<TierPlacement>,
    pub analysis: Option<LeadAnalysis>,
    pub receipt: Option<ReceiptArtifact>,
    pub redirect: ScheduledRedirect,
}

impl SubmissionSuccess {
    pub fn view(&self) -> SubmissionView {
        SubmissionView {
            lead_id: self.lead_id.clone(),
            kind: self.record.kind(),
            message: self.message,
            tier: self.tier.clone(),
            analysis: self.analysis.clone(),
            receipt: self.receipt.clone(),
            redirect_to: self.redirect.target().to_string(),
            redirect_after_secs: self.redirect.delay().as_secs(),
        }
    }
}

/// Serializable summary of a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub lead_id: LeadId,
    pub kind: LeadKind,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<TierPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<LeadAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptArtifact>,
    pub redirect_to: String,
    pub redirect_after_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("the form is locked while a submission is in flight")]
    InFlight,
    #[error("the form has already been submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Draft(#[from] DraftError),
}

pub fn success_message(kind: LeadKind) -> &'static str {
    match kind {
        LeadKind::Subscriber => "Thank you! Your message has been delivered.",
        LeadKind::Freelancer => {
            "Your application is received. You may get work within 24–72 hours if shortlisted."
        }
        LeadKind::Brand => {
            "Your collaboration request has been submitted. You will be contacted soon."
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One open form: draft, step cursor and submission state, owned by a single submitter.
pub struct FormSession<S, N> {
    service: Arc<LeadIntakeService<S, N>>,
    schema: Arc<FormSchema>,
    draft: Mutex<LeadDraft>,
    gate: Mutex<StepGate>,
    state: Mutex<SubmissionState>,
}

impl<S, N> FormSession<S, N>
where
    S: LeadStore + 'static,
    N: Notifier + 'static,
{
    pub(crate) fn new(service: Arc<LeadIntakeService<S, N>>, schema: Arc<FormSchema>) -> Self {
        let draft =
            LeadDraft::with_defaults(schema.kind, service.settings.brand_minimum_budget);
        let gate = StepGate::new(Arc::clone(&schema));
        Self {
            service,
            schema,
            draft: Mutex::new(draft),
            gate: Mutex::new(gate),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn kind(&self) -> LeadKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> SubmissionState {
        lock(&self.state).clone()
    }

    pub fn draft(&self) -> LeadDraft {
        lock(&self.draft).clone()
    }

    /// Apply an edit to the draft. Refused while a submission is running or after success.
    pub fn edit<F>(&self, apply: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut LeadDraft),
    {
        let _state = self.editable_state()?;
        apply(&mut lock(&self.draft));
        Ok(())
    }

    /// Replace the draft with the fields found in a JSON object.
    pub fn load_json(&self, payload: &Value) -> Result<(), SessionError> {
        let draft = LeadDraft::from_json(&self.schema, payload)?;
        let _state = self.editable_state()?;
        *lock(&self.draft) = draft;
        Ok(())
    }

    /// Locked state for a draft edit; callers keep it until the draft is written.
    fn editable_state(&self) -> Result<MutexGuard<'_, SubmissionState>, SessionError> {
        let state = lock(&self.state);
        if state.is_in_flight() {
            return Err(SessionError::InFlight);
        }
        if matches!(*state, SubmissionState::Succeeded { .. }) {
            return Err(SessionError::AlreadySubmitted);
        }
        Ok(state)
    }

    pub fn current_step(&self) -> usize {
        lock(&self.gate).cursor()
    }

    pub fn step_count(&self) -> usize {
        self.schema.step_count()
    }

    pub fn can_advance(&self) -> bool {
        let draft = lock(&self.draft);
        lock(&self.gate).can_advance(&draft)
    }

    pub fn step_errors(&self) -> Vec<FieldError> {
        let draft = lock(&self.draft);
        let gate = lock(&self.gate);
        gate.check(gate.cursor(), &draft)
    }

    pub fn advance(&self) -> Result<usize, StepBlocked> {
        let draft = lock(&self.draft);
        lock(&self.gate).advance(&draft)
    }

    pub fn retreat(&self) -> usize {
        lock(&self.gate).retreat()
    }

    /// Live tier for the brand budget field.
    pub fn budget_tier(&self) -> Option<TierPlacement> {
        if self.schema.kind != LeadKind::Brand {
            return None;
        }
        let budget = lock(&self.draft).number("estimatedBudget");
        Some(self.service.classify_budget(budget))
    }

    /// Clear the draft, rewind to the first step and return to idle.
    pub fn reset(&self) -> Result<(), SessionError> {
        let mut state = lock(&self.state);
        if state.is_in_flight() {
            return Err(SessionError::InFlight);
        }
        *lock(&self.draft) = LeadDraft::with_defaults(
            self.schema.kind,
            self.service.settings.brand_minimum_budget,
        );
        lock(&self.gate).reset();
        *state = SubmissionState::Idle;
        Ok(())
    }

    fn transition(&self, next: SubmissionState) {
        let mut state = lock(&self.state);
        debug!(
            kind = self.kind().label(),
            from = state.label(),
            to = next.label(),
            "submission transition"
        );
        *state = next;
    }

    /// Validate, persist, notify and build the receipt. At most one submission runs at a time.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let mut state = lock(&self.state);
            if state.is_in_flight() {
                return SubmitOutcome::AlreadyInFlight;
            }
            if matches!(*state, SubmissionState::Succeeded { .. }) {
                return SubmitOutcome::AlreadySubmitted;
            }
            *state = SubmissionState::Validating;
            lock(&self.draft).clone()
        };

        let kind = self.kind();
        let record = match finalize(&self.schema, &draft) {
            Ok(record) => record,
            Err(errors) => {
                info!(
                    kind = kind.label(),
                    invalid_fields = errors.len(),
                    "lead submission rejected"
                );
                self.transition(SubmissionState::Idle);
                return SubmitOutcome::Rejected(errors);
            }
        };

        let analysis = self.score(&record).await;

        self.transition(SubmissionState::Persisting);
        let document = LeadDocument {
            record: record.clone(),
            submission_date: Utc::now(),
            analysis: analysis.clone(),
        };
        let lead_id = match self
            .service
            .store
            .insert(kind.collection(), document)
            .await
        {
            Ok(lead_id) => lead_id,
            Err(err) => {
                error!(kind = kind.label(), error = %err, "failed to persist lead");
                let message = PERSISTENCE_FAILURE_MESSAGE.to_string();
                self.transition(SubmissionState::Failed {
                    message: message.clone(),
                });
                return SubmitOutcome::Failed { message };
            }
        };

        self.transition(SubmissionState::Notifying);
        self.notify(&record, analysis.as_ref()).await;

        let settings = &self.service.settings;
        let (tier, receipt) = match &record {
            LeadRecord::Brand(lead) => {
                let tier = settings.tiers.classify(lead.estimated_budget);
                let receipt = match self.service.receipts.generate(lead, Utc::now()) {
                    Ok(receipt) => Some(receipt),
                    Err(err) => {
                        warn!(lead_id = %lead_id.0, error = %err, "receipt generation failed");
                        None
                    }
                };
                (Some(tier), receipt)
            }
            _ => (None, None),
        };

        let redirect =
            ScheduledRedirect::schedule(settings.redirect_target(kind), settings.redirect_delay);

        info!(kind = kind.label(), lead_id = %lead_id.0, "lead submitted");
        self.transition(SubmissionState::Succeeded {
            lead_id: lead_id.clone(),
        });

        SubmitOutcome::Submitted(SubmissionSuccess {
            lead_id,
            record,
            message: success_message(kind),
            tier,
            analysis,
            receipt,
            redirect,
        })
    }

    async fn score(&self, record: &LeadRecord) -> Option<LeadAnalysis> {
        let scorer = self.service.scorer.as_ref()?;
        let lead_type = ScoredLeadType::for_kind(record.kind())?;

        let lead_data = match serde_json::to_string(record) {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, "unable to serialize lead for scoring");
                return None;
            }
        };

        let result = scorer
            .analyze(ScoringRequest {
                lead_data,
                lead_type,
            })
            .await
            .and_then(checked_analysis);

        match result {
            Ok(analysis) => Some(analysis),
            Err(err) => {
                warn!(kind = record.kind().label(), error = %err, "lead scoring skipped");
                None
            }
        }
    }

    /// Admin copy is awaited; the submitter confirmation runs detached.
    async fn notify(&self, record: &LeadRecord, analysis: Option<&LeadAnalysis>) {
        let settings = &self.service.settings;

        let admin = admin_notification(record, analysis, settings);
        if let Err(err) = self.service.notifier.send(admin).await {
            warn!(kind = record.kind().label(), error = %err, "admin notification failed");
        }

        if let Some(confirmation) = submitter_confirmation(record, settings) {
            let notifier = Arc::clone(&self.service.notifier);
            tokio::spawn(async move {
                if let Err(err) = notifier.send(confirmation).await {
                    warn!(error = %err, "submitter confirmation failed");
                }
            });
        }
    }
}
