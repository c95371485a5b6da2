use std::time::Duration;

use super::domain::LeadKind;
use super::receipt::ReceiptBranding;
use super::tiers::BudgetTierClassifier;

pub const DEFAULT_BRAND_MINIMUM_BUDGET: f64 = 300.0;
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(10);
pub const DEFAULT_RECEIPT_ROWS_PER_PAGE: usize = 12;

/// Product configuration for the intake workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeSettings {
    pub brand_minimum_budget: f64,
    pub tiers: BudgetTierClassifier,
    pub redirect_delay: Duration,
    pub brand_redirect_target: String,
    pub default_redirect_target: String,
    pub admin_email: String,
    pub sender: String,
    pub receipt_rows_per_page: usize,
    pub branding: ReceiptBranding,
}

impl IntakeSettings {
    /// Page the submitter lands on once the success dialog closes.
    pub fn redirect_target(&self, kind: LeadKind) -> &str {
        match kind {
            LeadKind::Brand => &self.brand_redirect_target,
            LeadKind::Freelancer | LeadKind::Subscriber => &self.default_redirect_target,
        }
    }
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            brand_minimum_budget: DEFAULT_BRAND_MINIMUM_BUDGET,
            tiers: BudgetTierClassifier::standard(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            brand_redirect_target: "/brand".to_string(),
            default_redirect_target: "/".to_string(),
            admin_email: "youbtechcode@gmail.com".to_string(),
            sender: "noreply@example.com".to_string(),
            receipt_rows_per_page: DEFAULT_RECEIPT_ROWS_PER_PAGE,
            branding: ReceiptBranding::default(),
        }
    }
}
