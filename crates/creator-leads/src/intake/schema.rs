use serde::Serialize;

use super::domain::{
    ChoiceOption, ExperienceTier, LeadKind, MessageCategory, PaymentMethod, Platform,
    ProductType, Skill, VideoType,
};

/// Countries offered by the brand form's budget step.
pub const COUNTRIES: &[&str] = &[
    "Australia",
    "Bangladesh",
    "Brazil",
    "Canada",
    "China",
    "France",
    "Germany",
    "India",
    "Indonesia",
    "Ireland",
    "Italy",
    "Japan",
    "Malaysia",
    "Mexico",
    "Nepal",
    "Netherlands",
    "New Zealand",
    "Nigeria",
    "Pakistan",
    "Philippines",
    "Saudi Arabia",
    "Singapore",
    "South Africa",
    "South Korea",
    "Spain",
    "Sri Lanka",
    "Sweden",
    "Switzerland",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
    "Vietnam",
];

/// Constraint attached to a field; consumed uniformly by the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text { min_len: usize },
    OptionalText,
    Email,
    Phone { min_len: usize },
    Url { required: bool },
    Choice { options: Vec<&'static str> },
    Tags { options: Vec<&'static str> },
    Budget { minimum: f64 },
    Consent,
}

/// Typed row of a form's field table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Message reported when the rule fails.
    pub message: &'static str,
}

impl FieldDescriptor {
    fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        message: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            message,
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(
            self.kind,
            FieldKind::OptionalText | FieldKind::Url { required: false }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

/// Ordered steps and field table for one lead kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSchema {
    pub kind: LeadKind,
    pub steps: Vec<StepDescriptor>,
}

impl FormSchema {
    pub fn for_kind(kind: LeadKind, brand_minimum_budget: f64) -> Self {
        match kind {
            LeadKind::Subscriber => Self::subscriber(),
            LeadKind::Freelancer => Self::freelancer(),
            LeadKind::Brand => Self::brand(brand_minimum_budget),
        }
    }

    pub fn subscriber() -> Self {
        Self {
            kind: LeadKind::Subscriber,
            steps: vec![StepDescriptor {
                name: "Message",
                fields: vec![
                    FieldDescriptor::new(
                        "name",
                        "Name",
                        FieldKind::Text { min_len: 2 },
                        "Name must be at least 2 characters.",
                    ),
                    FieldDescriptor::new(
                        "whatsappNumber",
                        "WhatsApp Number",
                        FieldKind::Phone { min_len: 10 },
                        "Please enter a valid WhatsApp number.",
                    ),
                    FieldDescriptor::new(
                        "messageType",
                        "Message Type",
                        FieldKind::Choice {
                            options: MessageCategory::slugs(),
                        },
                        "Please select a message type.",
                    ),
                    FieldDescriptor::new(
                        "message",
                        "Message",
                        FieldKind::Text { min_len: 10 },
                        "Message must be at least 10 characters.",
                    ),
                ],
            }],
        }
    }

    pub fn freelancer() -> Self {
        Self {
            kind: LeadKind::Freelancer,
            steps: vec![
                StepDescriptor {
                    name: "Contact",
                    fields: vec![
                        FieldDescriptor::new(
                            "fullName",
                            "Full Name",
                            FieldKind::Text { min_len: 2 },
                            "Full name must be at least 2 characters.",
                        ),
                        FieldDescriptor::new(
                            "email",
                            "Email",
                            FieldKind::Email,
                            "Please enter a valid email address.",
                        ),
                        FieldDescriptor::new(
                            "mobileNumber",
                            "Mobile Number",
                            FieldKind::Phone { min_len: 10 },
                            "Please enter a valid mobile number.",
                        ),
                        FieldDescriptor::new(
                            "portfolioLink",
                            "Portfolio Link",
                            FieldKind::Url { required: true },
                            "Please enter a valid URL.",
                        ),
                    ],
                },
                StepDescriptor {
                    name: "Expertise",
                    fields: vec![
                        FieldDescriptor::new(
                            "skills",
                            "Skills",
                            FieldKind::Tags {
                                options: Skill::slugs(),
                            },
                            "Please select at least one skill.",
                        ),
                        FieldDescriptor::new(
                            "experience",
                            "Experience",
                            FieldKind::Choice {
                                options: ExperienceTier::slugs(),
                            },
                            "Please specify your experience level.",
                        ),
                        FieldDescriptor::new(
                            "description",
                            "Description",
                            FieldKind::Text { min_len: 20 },
                            "Description must be at least 20 characters.",
                        ),
                    ],
                },
            ],
        }
    }

    pub fn brand(minimum_budget: f64) -> Self {
        Self {
            kind: LeadKind::Brand,
            steps: vec![
                StepDescriptor {
                    name: "Brand Details",
                    fields: vec![
                        FieldDescriptor::new(
                            "brandName",
                            "Brand Name",
                            FieldKind::Text { min_len: 2 },
                            "Brand name must be at least 2 characters.",
                        ),
                        FieldDescriptor::new(
                            "contactPerson",
                            "Contact Person",
                            FieldKind::Text { min_len: 2 },
                            "Contact person must be at least 2 characters.",
                        ),
                        FieldDescriptor::new(
                            "workEmail",
                            "Work Email",
                            FieldKind::Email,
                            "Please enter a valid work email.",
                        ),
                        FieldDescriptor::new(
                            "productLink",
                            "Product Link",
                            FieldKind::Url { required: false },
                            "Please enter a valid product link.",
                        ),
                    ],
                },
                StepDescriptor {
                    name: "Overview",
                    fields: vec![
                        FieldDescriptor::new(
                            "videoType",
                            "Video Type",
                            FieldKind::Choice {
                                options: VideoType::slugs(),
                            },
                            "Please select a video type.",
                        ),
                        FieldDescriptor::new(
                            "productType",
                            "Product Type",
                            FieldKind::Choice {
                                options: ProductType::slugs(),
                            },
                            "Please select a product type.",
                        ),
                        FieldDescriptor::new(
                            "platforms",
                            "Platforms",
                            FieldKind::Tags {
                                options: Platform::slugs(),
                            },
                            "Please select at least one platform.",
                        ),
                        FieldDescriptor::new(
                            "description",
                            "Campaign Description",
                            FieldKind::OptionalText,
                            "Description must be text.",
                        ),
                    ],
                },
                StepDescriptor {
                    name: "Assets",
                    fields: vec![
                        FieldDescriptor::new(
                            "assetsLink",
                            "Assets Link",
                            FieldKind::Url { required: false },
                            "Please enter a valid URL for your assets.",
                        ),
                        FieldDescriptor::new(
                            "keywords",
                            "Keywords",
                            FieldKind::OptionalText,
                            "Keywords must be text.",
                        ),
                    ],
                },
                StepDescriptor {
                    name: "Budget",
                    fields: vec![
                        FieldDescriptor::new(
                            "estimatedBudget",
                            "Estimated Budget (USD)",
                            FieldKind::Budget {
                                minimum: minimum_budget,
                            },
                            "Budget is below the minimum for a collaboration.",
                        ),
                        FieldDescriptor::new(
                            "country",
                            "Country",
                            FieldKind::Choice {
                                options: COUNTRIES.to_vec(),
                            },
                            "Please select your country.",
                        ),
                        FieldDescriptor::new(
                            "paymentMethod",
                            "Preferred Payment Method",
                            FieldKind::Choice {
                                options: PaymentMethod::slugs(),
                            },
                            "Please select a payment method.",
                        ),
                    ],
                },
                StepDescriptor {
                    name: "Submit",
                    fields: vec![FieldDescriptor::new(
                        "termsAgreed",
                        "Terms & Privacy",
                        FieldKind::Consent,
                        "You must agree to the terms and privacy policy.",
                    )],
                },
            ],
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.steps.iter().flat_map(|step| step.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().find(|field| field.name == name)
    }
}
