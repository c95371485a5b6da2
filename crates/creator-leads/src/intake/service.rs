use std::collections::BTreeMap;
use std::sync::Arc;

use super::collaborators::{LeadStore, Notifier, QualityScorer};
use super::domain::LeadKind;
use super::receipt::ReceiptGenerator;
use super::schema::FormSchema;
use super::session::FormSession;
use super::settings::IntakeSettings;
use super::tiers::TierPlacement;

/// Shared collaborators and configuration. Each opened form gets its own [`FormSession`].
pub struct LeadIntakeService<S, N> {
    pub(crate) store: Arc<S>,
    pub(crate) notifier: Arc<N>,
    pub(crate) scorer: Option<Arc<dyn QualityScorer>>,
    pub(crate) settings: Arc<IntakeSettings>,
    pub(crate) receipts: ReceiptGenerator,
    schemas: BTreeMap<LeadKind, Arc<FormSchema>>,
}

impl<S, N> LeadIntakeService<S, N>
where
    S: LeadStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, settings: IntakeSettings) -> Self {
        let schemas = LeadKind::ALL
            .into_iter()
            .map(|kind| {
                let schema = FormSchema::for_kind(kind, settings.brand_minimum_budget);
                (kind, Arc::new(schema))
            })
            .collect();
        let receipts =
            ReceiptGenerator::new(settings.branding.clone(), settings.receipt_rows_per_page);

        Self {
            store,
            notifier,
            scorer: None,
            settings: Arc::new(settings),
            receipts,
            schemas,
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn QualityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn settings(&self) -> &IntakeSettings {
        &self.settings
    }

    pub fn schema(&self, kind: LeadKind) -> Arc<FormSchema> {
        match self.schemas.get(&kind) {
            Some(schema) => Arc::clone(schema),
            None => Arc::new(FormSchema::for_kind(kind, self.settings.brand_minimum_budget)),
        }
    }

    pub fn classify_budget(&self, budget: f64) -> TierPlacement {
        self.settings.tiers.classify(budget)
    }

    /// Start a fresh form instance with its own draft, cursor and submission state.
    pub fn open_form(self: &Arc<Self>, kind: LeadKind) -> FormSession<S, N> {
        FormSession::new(Arc::clone(self), self.schema(kind))
    }
}
