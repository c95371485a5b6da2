use std::time::Duration;

use async_trait::async_trait;

use super::collaborators::{QualityScorer, ScoringError, ScoringRequest};
use super::domain::LeadAnalysis;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Posts `{ leadData, leadType }` to a scoring endpoint and reads `{ leadScore, reasoning }`.
#[derive(Debug, Clone)]
pub struct HttpQualityScorer {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpQualityScorer {
    pub fn new(endpoint: reqwest::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl QualityScorer for HttpQualityScorer {
    async fn analyze(&self, request: ScoringRequest) -> Result<LeadAnalysis, ScoringError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| ScoringError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::InvalidResponse(format!("HTTP {status}")));
        }

        let analysis = response
            .json::<LeadAnalysis>()
            .await
            .map_err(|err| ScoringError::InvalidResponse(err.to_string()))?;
        checked_analysis(analysis)
    }
}

pub(crate) fn checked_analysis(analysis: LeadAnalysis) -> Result<LeadAnalysis, ScoringError> {
    if !(0.0..=1.0).contains(&analysis.lead_score) {
        return Err(ScoringError::ScoreOutOfRange(analysis.lead_score));
    }
    Ok(analysis)
}
