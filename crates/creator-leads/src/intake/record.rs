use std::collections::BTreeSet;

use super::domain::{
    BrandLead, ChoiceOption, FreelancerLead, LeadKind, LeadRecord, SubscriberLead,
};
use super::draft::LeadDraft;
use super::schema::FormSchema;
use super::validation::{validate_all, FieldError};

/// Validate every field and freeze the draft into an immutable record.
pub fn finalize(schema: &FormSchema, draft: &LeadDraft) -> Result<LeadRecord, Vec<FieldError>> {
    let errors = validate_all(schema, draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    let record = match schema.kind {
        LeadKind::Subscriber => build_subscriber(draft).map(LeadRecord::Subscriber),
        LeadKind::Freelancer => build_freelancer(draft).map(LeadRecord::Freelancer),
        LeadKind::Brand => build_brand(draft).map(LeadRecord::Brand),
    };
    record.map_err(|error| vec![error])
}

fn build_subscriber(draft: &LeadDraft) -> Result<SubscriberLead, FieldError> {
    Ok(SubscriberLead {
        name: required_text(draft, "name"),
        whatsapp_number: required_text(draft, "whatsappNumber"),
        message_type: choice(draft, "messageType")?,
        message: required_text(draft, "message"),
    })
}

fn build_freelancer(draft: &LeadDraft) -> Result<FreelancerLead, FieldError> {
    Ok(FreelancerLead {
        full_name: required_text(draft, "fullName"),
        email: required_text(draft, "email"),
        mobile_number: required_text(draft, "mobileNumber"),
        portfolio_link: required_text(draft, "portfolioLink"),
        skills: tag_set(draft, "skills")?,
        experience: choice(draft, "experience")?,
        description: required_text(draft, "description"),
    })
}

fn build_brand(draft: &LeadDraft) -> Result<BrandLead, FieldError> {
    Ok(BrandLead {
        brand_name: required_text(draft, "brandName"),
        contact_person: required_text(draft, "contactPerson"),
        work_email: required_text(draft, "workEmail"),
        product_link: draft.optional_text("productLink"),
        video_type: choice(draft, "videoType")?,
        product_type: choice(draft, "productType")?,
        description: draft.optional_text("description"),
        platforms: tag_set(draft, "platforms")?,
        assets_link: draft.optional_text("assetsLink"),
        keywords: draft.optional_text("keywords"),
        estimated_budget: draft.number("estimatedBudget"),
        country: required_text(draft, "country"),
        payment_method: choice(draft, "paymentMethod")?,
        terms_agreed: draft.flag("termsAgreed") == Some(true),
    })
}

fn required_text(draft: &LeadDraft, name: &str) -> String {
    draft.text(name).trim().to_string()
}

fn choice<T: ChoiceOption>(draft: &LeadDraft, name: &str) -> Result<T, FieldError> {
    T::from_slug(draft.text(name))
        .ok_or_else(|| FieldError::new(name, format!("unsupported value '{}'", draft.text(name))))
}

fn tag_set<T: ChoiceOption + Ord>(
    draft: &LeadDraft,
    name: &str,
) -> Result<BTreeSet<T>, FieldError> {
    draft
        .tags(name)
        .iter()
        .map(|tag| {
            T::from_slug(tag)
                .ok_or_else(|| FieldError::new(name, format!("unsupported tag '{tag}'")))
        })
        .collect()
}
