use async_trait::async_trait;
use creator_leads::intake::{
    EmailMessage, LeadDocument, LeadId, LeadStore, Notifier, NotifyError, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) leads: Arc<InMemoryLeadStore>,
}

/// Append-only store keeping documents in submission order.
#[derive(Default)]
pub(crate) struct InMemoryLeadStore {
    sequence: AtomicU64,
    documents: Mutex<Vec<(String, LeadId, LeadDocument)>>,
}

impl InMemoryLeadStore {
    pub(crate) fn documents(&self) -> Vec<(LeadId, LeadDocument)> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, id, document)| (id.clone(), document.clone()))
            .collect()
    }

    pub(crate) fn count_in(&self, collection: &str) -> usize {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(stored_in, _, _)| stored_in == collection)
            .count()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn insert(
        &self,
        collection: &str,
        document: LeadDocument,
    ) -> Result<LeadId, StoreError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = LeadId(format!("lead-{sequence:06}"));
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((collection.to_string(), id.clone(), document));
        Ok(id)
    }
}

/// Logs outbound e-mail instead of delivering it and keeps a copy for inspection.
#[derive(Default)]
pub(crate) struct LoggingOutbox {
    sent: Mutex<Vec<EmailMessage>>,
}

impl LoggingOutbox {
    pub(crate) fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Notifier for LoggingOutbox {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        info!(
            audience = ?message.audience,
            to = %message.to,
            subject = %message.subject,
            "outbound email queued"
        );
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
        Ok(())
    }
}
