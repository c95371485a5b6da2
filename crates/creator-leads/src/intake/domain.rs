use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier handed back by the lead store for a persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// The three audiences the site collects leads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    Subscriber,
    Freelancer,
    Brand,
}

impl LeadKind {
    pub const ALL: [LeadKind; 3] = [LeadKind::Subscriber, LeadKind::Freelancer, LeadKind::Brand];

    pub const fn label(self) -> &'static str {
        match self {
            LeadKind::Subscriber => "subscriber",
            LeadKind::Freelancer => "freelancer",
            LeadKind::Brand => "brand",
        }
    }

    /// Document collection the lead store writes this kind into.
    pub const fn collection(self) -> &'static str {
        match self {
            LeadKind::Subscriber => "subscribers",
            LeadKind::Freelancer => "freelancers",
            LeadKind::Brand => "brand_collaborations",
        }
    }

    pub fn from_slug(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Closed set of wire values for a choice or tag field.
pub trait ChoiceOption: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Value submitted by the form and stored in the document.
    fn slug(self) -> &'static str;

    /// Human readable label used in e-mails and receipts.
    fn label(self) -> &'static str;

    fn from_slug(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.slug() == raw)
    }

    fn slugs() -> Vec<&'static str> {
        Self::ALL.iter().map(|option| option.slug()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageCategory {
    #[serde(rename = "General message")]
    GeneralMessage,
    #[serde(rename = "Feedback")]
    Feedback,
    #[serde(rename = "Suggestions")]
    Suggestions,
    #[serde(rename = "Product questions")]
    ProductQuestions,
    #[serde(rename = "Personal message")]
    PersonalMessage,
}

impl ChoiceOption for MessageCategory {
    const ALL: &'static [Self] = &[
        MessageCategory::GeneralMessage,
        MessageCategory::Feedback,
        MessageCategory::Suggestions,
        MessageCategory::ProductQuestions,
        MessageCategory::PersonalMessage,
    ];

    fn slug(self) -> &'static str {
        match self {
            MessageCategory::GeneralMessage => "General message",
            MessageCategory::Feedback => "Feedback",
            MessageCategory::Suggestions => "Suggestions",
            MessageCategory::ProductQuestions => "Product questions",
            MessageCategory::PersonalMessage => "Personal message",
        }
    }

    fn label(self) -> &'static str {
        self.slug()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Skill {
    Editing,
    Thumbnails,
    UiUx,
    Flutter,
    ScriptWriting,
    MicroTasks,
}

impl ChoiceOption for Skill {
    const ALL: &'static [Self] = &[
        Skill::Editing,
        Skill::Thumbnails,
        Skill::UiUx,
        Skill::Flutter,
        Skill::ScriptWriting,
        Skill::MicroTasks,
    ];

    fn slug(self) -> &'static str {
        match self {
            Skill::Editing => "editing",
            Skill::Thumbnails => "thumbnails",
            Skill::UiUx => "ui-ux",
            Skill::Flutter => "flutter",
            Skill::ScriptWriting => "script-writing",
            Skill::MicroTasks => "micro-tasks",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Skill::Editing => "Editing",
            Skill::Thumbnails => "Thumbnails",
            Skill::UiUx => "UI/UX",
            Skill::Flutter => "Flutter Widgets",
            Skill::ScriptWriting => "Script Writing",
            Skill::MicroTasks => "Micro-tasks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceTier {
    #[serde(rename = "Beginner (0-1 years)")]
    Beginner,
    #[serde(rename = "Intermediate (1-3 years)")]
    Intermediate,
    #[serde(rename = "Advanced (3-5 years)")]
    Advanced,
    #[serde(rename = "Expert (5+ years)")]
    Expert,
}

impl ChoiceOption for ExperienceTier {
    const ALL: &'static [Self] = &[
        ExperienceTier::Beginner,
        ExperienceTier::Intermediate,
        ExperienceTier::Advanced,
        ExperienceTier::Expert,
    ];

    fn slug(self) -> &'static str {
        match self {
            ExperienceTier::Beginner => "Beginner (0-1 years)",
            ExperienceTier::Intermediate => "Intermediate (1-3 years)",
            ExperienceTier::Advanced => "Advanced (3-5 years)",
            ExperienceTier::Expert => "Expert (5+ years)",
        }
    }

    fn label(self) -> &'static str {
        self.slug()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    Dedicated,
    Integrated,
    Shorts,
}

impl ChoiceOption for VideoType {
    const ALL: &'static [Self] = &[VideoType::Dedicated, VideoType::Integrated, VideoType::Shorts];

    fn slug(self) -> &'static str {
        match self {
            VideoType::Dedicated => "dedicated",
            VideoType::Integrated => "integrated",
            VideoType::Shorts => "shorts",
        }
    }

    fn label(self) -> &'static str {
        match self {
            VideoType::Dedicated => "Dedicated",
            VideoType::Integrated => "Integrated",
            VideoType::Shorts => "Shorts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Digital,
    Physical,
}

impl ChoiceOption for ProductType {
    const ALL: &'static [Self] = &[ProductType::Digital, ProductType::Physical];

    fn slug(self) -> &'static str {
        match self {
            ProductType::Digital => "digital",
            ProductType::Physical => "physical",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ProductType::Digital => "Digital",
            ProductType::Physical => "Physical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    Instagram,
    Telegram,
}

impl ChoiceOption for Platform {
    const ALL: &'static [Self] = &[Platform::Youtube, Platform::Instagram, Platform::Telegram];

    fn slug(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Telegram => "telegram",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Instagram => "Instagram",
            Platform::Telegram => "Telegram",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Upi,
    Wise,
    Paypal,
    DebitCard,
    CreditCard,
    BankAccount,
}

impl ChoiceOption for PaymentMethod {
    const ALL: &'static [Self] = &[
        PaymentMethod::Upi,
        PaymentMethod::Wise,
        PaymentMethod::Paypal,
        PaymentMethod::DebitCard,
        PaymentMethod::CreditCard,
        PaymentMethod::BankAccount,
    ];

    fn slug(self) -> &'static str {
        match self {
            PaymentMethod::Upi => "upi",
            PaymentMethod::Wise => "wise",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::DebitCard => "debit-card",
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::BankAccount => "bank-account",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Wise => "Wise",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::BankAccount => "Bank Account",
        }
    }
}

/// Message sent from the subscriber connect form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberLead {
    pub name: String,
    pub whatsapp_number: String,
    pub message_type: MessageCategory,
    pub message: String,
}

/// Application to join the freelancer network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerLead {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub portfolio_link: String,
    pub skills: BTreeSet<Skill>,
    pub experience: ExperienceTier,
    pub description: String,
}

/// Brand collaboration inquiry collected by the five step brand form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandLead {
    pub brand_name: String,
    pub contact_person: String,
    pub work_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_link: Option<String>,
    pub video_type: VideoType,
    pub product_type: ProductType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub platforms: BTreeSet<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub estimated_budget: f64,
    pub country: String,
    pub payment_method: PaymentMethod,
    pub terms_agreed: bool,
}

impl BrandLead {
    /// Notice shown for payment rails where fees fall on the brand.
    pub fn payment_advisory(&self) -> Option<&'static str> {
        match self.payment_method {
            PaymentMethod::Upi => None,
            _ => Some("Taxes and processing fees will be borne by the brand."),
        }
    }

    pub fn platform_labels(&self) -> Vec<&'static str> {
        self.platforms.iter().map(|platform| platform.label()).collect()
    }
}

/// Immutable lead built from a draft that passed every field rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeadRecord {
    Subscriber(SubscriberLead),
    Freelancer(FreelancerLead),
    Brand(BrandLead),
}

impl LeadRecord {
    pub fn kind(&self) -> LeadKind {
        match self {
            LeadRecord::Subscriber(_) => LeadKind::Subscriber,
            LeadRecord::Freelancer(_) => LeadKind::Freelancer,
            LeadRecord::Brand(_) => LeadKind::Brand,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            LeadRecord::Subscriber(lead) => &lead.name,
            LeadRecord::Freelancer(lead) => &lead.full_name,
            LeadRecord::Brand(lead) => &lead.brand_name,
        }
    }

    pub fn contact_email(&self) -> Option<&str> {
        match self {
            LeadRecord::Subscriber(_) => None,
            LeadRecord::Freelancer(lead) => Some(&lead.email),
            LeadRecord::Brand(lead) => Some(&lead.work_email),
        }
    }

    pub fn contact_phone(&self) -> Option<&str> {
        match self {
            LeadRecord::Subscriber(lead) => Some(&lead.whatsapp_number),
            LeadRecord::Freelancer(lead) => Some(&lead.mobile_number),
            LeadRecord::Brand(_) => None,
        }
    }

    pub fn budget(&self) -> Option<f64> {
        match self {
            LeadRecord::Brand(lead) => Some(lead.estimated_budget),
            _ => None,
        }
    }

    /// One line digest for exports and log lines.
    pub fn summary(&self) -> String {
        match self {
            LeadRecord::Subscriber(lead) => {
                format!("{}: {}", lead.message_type.label(), lead.message)
            }
            LeadRecord::Freelancer(lead) => {
                let skills: Vec<&str> = lead.skills.iter().map(|skill| skill.label()).collect();
                format!("{} | {}", lead.experience.label(), skills.join(", "))
            }
            LeadRecord::Brand(lead) => format!(
                "{} {} video on {}",
                lead.video_type.label(),
                lead.product_type.label().to_ascii_lowercase(),
                lead.platform_labels().join(", ")
            ),
        }
    }
}

/// Likelihood estimate attached by the quality scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAnalysis {
    pub lead_score: f64,
    pub reasoning: String,
}

/// Shape written to the lead store: the record, its submission time and the optional analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDocument {
    #[serde(flatten)]
    pub record: LeadRecord,
    pub submission_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<LeadAnalysis>,
}
