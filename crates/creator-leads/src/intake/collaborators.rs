use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{LeadAnalysis, LeadDocument, LeadId, LeadKind};

/// Append-only document sink for submitted leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, collection: &str, document: LeadDocument)
        -> Result<LeadId, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("lead store unavailable: {0}")]
    Unavailable(String),
    #[error("lead store refused the write: {0}")]
    PermissionDenied(String),
}

/// Who an outbound e-mail is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Admin,
    Submitter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub audience: Audience,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Best-effort e-mail dispatch. Errors are logged by the coordinator and never fail a submission.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("mail transport failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoredLeadType {
    Freelancer,
    Brand,
}

impl ScoredLeadType {
    pub fn for_kind(kind: LeadKind) -> Option<Self> {
        match kind {
            LeadKind::Freelancer => Some(ScoredLeadType::Freelancer),
            LeadKind::Brand => Some(ScoredLeadType::Brand),
            LeadKind::Subscriber => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub lead_data: String,
    pub lead_type: ScoredLeadType,
}

/// Optional conversion-likelihood scorer.
#[async_trait]
pub trait QualityScorer: Send + Sync {
    async fn analyze(&self, request: ScoringRequest) -> Result<LeadAnalysis, ScoringError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring service unreachable: {0}")]
    Transport(String),
    #[error("scoring service returned an unusable response: {0}")]
    InvalidResponse(String),
    #[error("lead score {0} is outside [0, 1]")]
    ScoreOutOfRange(f64),
}
