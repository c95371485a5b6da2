use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::intake::collaborators::{
    Audience, EmailMessage, LeadStore, Notifier, NotifyError, QualityScorer, ScoringError,
    ScoringRequest, StoreError,
};
use crate::intake::domain::{
    BrandLead, LeadAnalysis, LeadDocument, LeadId, LeadKind, PaymentMethod, Platform,
    ProductType, VideoType,
};
use crate::intake::draft::LeadDraft;
use crate::intake::schema::FormSchema;
use crate::intake::service::LeadIntakeService;
use crate::intake::settings::IntakeSettings;

#[derive(Default)]
pub(super) struct MemoryStore {
    documents: Mutex<Vec<(String, LeadId, LeadDocument)>>,
}

impl MemoryStore {
    pub(super) fn writes(&self) -> Vec<(String, LeadId, LeadDocument)> {
        self.documents.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        document: LeadDocument,
    ) -> Result<LeadId, StoreError> {
        let mut guard = self.documents.lock().expect("store mutex poisoned");
        let id = LeadId(format!("{collection}-{}", guard.len() + 1));
        guard.push((collection.to_string(), id.clone(), document));
        Ok(id)
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl LeadStore for UnavailableStore {
    async fn insert(
        &self,
        _collection: &str,
        _document: LeadDocument,
    ) -> Result<LeadId, StoreError> {
        Err(StoreError::Unavailable("connection reset by peer".to_string()))
    }
}

/// Holds every write until `release` is notified.
#[derive(Default)]
pub(super) struct GatedStore {
    pub(super) inner: MemoryStore,
    pub(super) entered: Notify,
    pub(super) release: Notify,
    pub(super) attempts: AtomicUsize,
}

#[async_trait]
impl LeadStore for GatedStore {
    async fn insert(
        &self,
        collection: &str,
        document: LeadDocument,
    ) -> Result<LeadId, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.insert(collection, document).await
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    sent: Mutex<Vec<EmailMessage>>,
    fail_for: Option<Audience>,
}

impl RecordingNotifier {
    pub(super) fn failing_for(audience: Audience) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(audience),
        }
    }

    pub(super) fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        if self.fail_for == Some(message.audience) {
            return Err(NotifyError::Transport("smtp 421".to_string()));
        }
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(message);
        Ok(())
    }
}

pub(super) struct FixedScorer(pub(super) f64);

#[async_trait]
impl QualityScorer for FixedScorer {
    async fn analyze(&self, _request: ScoringRequest) -> Result<LeadAnalysis, ScoringError> {
        Ok(LeadAnalysis {
            lead_score: self.0,
            reasoning: "Clear brief with a realistic budget.".to_string(),
        })
    }
}

pub(super) struct OfflineScorer;

#[async_trait]
impl QualityScorer for OfflineScorer {
    async fn analyze(&self, _request: ScoringRequest) -> Result<LeadAnalysis, ScoringError> {
        Err(ScoringError::Transport("connection refused".to_string()))
    }
}

pub(super) fn settings() -> IntakeSettings {
    IntakeSettings {
        sender: "forms@ybt.test".to_string(),
        admin_email: "admin@ybt.test".to_string(),
        ..IntakeSettings::default()
    }
}

pub(super) fn build_service<S, N>(store: Arc<S>, notifier: Arc<N>) -> Arc<LeadIntakeService<S, N>>
where
    S: LeadStore + 'static,
    N: Notifier + 'static,
{
    Arc::new(LeadIntakeService::new(store, notifier, settings()))
}

pub(super) fn subscriber_payload() -> Value {
    json!({
        "name": "Ravi Kumar",
        "whatsappNumber": "+91 98765 43210",
        "messageType": "Product questions",
        "message": "Which microphone do you use for the tutorials?",
    })
}

pub(super) fn freelancer_payload() -> Value {
    json!({
        "fullName": "Meera Shah",
        "email": "meera@studio.example",
        "mobileNumber": "9876543210",
        "portfolioLink": "https://meera.example/portfolio",
        "skills": ["editing", "thumbnails"],
        "experience": "Intermediate (1-3 years)",
        "description": "Three years cutting long-form tech reviews.",
    })
}

pub(super) fn brand_payload() -> Value {
    json!({
        "brandName": "Acme Audio Labs",
        "contactPerson": "Dana Cole",
        "workEmail": "dana@acme.example",
        "productLink": "https://acme.example/mic",
        "videoType": "integrated",
        "productType": "physical",
        "platforms": ["youtube", "instagram"],
        "description": "Launch of our new USB microphone.",
        "assetsLink": "",
        "keywords": "podcast, mic",
        "estimatedBudget": 300,
        "country": "India",
        "paymentMethod": "paypal",
        "termsAgreed": true,
    })
}

pub(super) fn draft_for(kind: LeadKind, payload: &Value) -> LeadDraft {
    let schema = FormSchema::for_kind(kind, settings().brand_minimum_budget);
    LeadDraft::from_json(&schema, payload).expect("payload is an object")
}

pub(super) fn brand_lead() -> BrandLead {
    BrandLead {
        brand_name: "Acme   Audio Labs".to_string(),
        contact_person: "Dana Cole".to_string(),
        work_email: "dana@acme.example".to_string(),
        product_link: None,
        video_type: VideoType::Dedicated,
        product_type: ProductType::Digital,
        description: Some("Review <b>launch</b> & unboxing".to_string()),
        platforms: [Platform::Youtube, Platform::Telegram].into_iter().collect(),
        assets_link: Some("https://acme.example/press".to_string()),
        keywords: None,
        estimated_budget: 1250.5,
        country: "Canada".to_string(),
        payment_method: PaymentMethod::Wise,
        terms_agreed: true,
    }
}

pub(super) fn issued_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap()
}

pub(super) async fn read_json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
