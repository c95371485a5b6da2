//! Multi-step lead intake: form schemas, field validation, step gating, budget tiers,
//! submission coordination and inquiry receipts.
//!
//! A [`LeadIntakeService`] owns the shared collaborators (store, notifier, optional scorer)
//! and hands out one [`FormSession`] per open form. Sessions are independent of each other;
//! within a session at most one submission runs at a time.

pub mod collaborators;
pub mod domain;
pub mod draft;
pub mod export;
mod markup;
mod notifications;
pub mod receipt;
pub mod record;
pub mod redirect;
pub mod router;
pub mod schema;
pub mod scoring;
pub mod service;
pub mod session;
pub mod settings;
pub mod steps;
pub mod tiers;
pub mod validation;

#[cfg(test)]
mod tests;

pub use collaborators::{
    Audience, EmailMessage, LeadStore, Notifier, NotifyError, QualityScorer, ScoredLeadType,
    ScoringError, ScoringRequest, StoreError,
};
pub use domain::{
    BrandLead, ChoiceOption, ExperienceTier, FreelancerLead, LeadAnalysis, LeadDocument, LeadId,
    LeadKind, LeadRecord, MessageCategory, PaymentMethod, Platform, ProductType, Skill,
    SubscriberLead, VideoType,
};
pub use draft::{coerce_number, DraftError, FieldValue, LeadDraft};
pub use export::write_csv;
pub use receipt::{InquiryId, ReceiptArtifact, ReceiptBranding, ReceiptError, ReceiptGenerator};
pub use record::finalize;
pub use redirect::{RedirectOutcome, ScheduledRedirect};
pub use router::lead_router;
pub use schema::{FieldDescriptor, FieldKind, FormSchema, StepDescriptor};
pub use scoring::HttpQualityScorer;
pub use service::LeadIntakeService;
pub use session::{
    FormSession, SessionError, SubmissionState, SubmissionSuccess, SubmissionView, SubmitOutcome,
    PERSISTENCE_FAILURE_MESSAGE,
};
pub use settings::IntakeSettings;
pub use steps::{StepBlocked, StepGate};
pub use tiers::{BudgetTierClassifier, TierBand, TierPlacement, TierTableError};
pub use validation::{validate_all, validate_field, FieldError, Validation};
