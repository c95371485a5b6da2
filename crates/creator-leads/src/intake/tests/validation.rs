use super::common::*;
use serde_json::json;

use crate::intake::domain::LeadKind;
use crate::intake::draft::{coerce_number, FieldValue, LeadDraft};
use crate::intake::record::finalize;
use crate::intake::schema::FormSchema;
use crate::intake::validation::{validate_all, validate_field, Validation};
use crate::intake::LeadRecord;

#[test]
fn complete_drafts_validate_for_every_kind() {
    for (kind, payload) in [
        (LeadKind::Subscriber, subscriber_payload()),
        (LeadKind::Freelancer, freelancer_payload()),
        (LeadKind::Brand, brand_payload()),
    ] {
        let schema = FormSchema::for_kind(kind, 300.0);
        let draft = draft_for(kind, &payload);
        assert!(
            validate_all(&schema, &draft).is_empty(),
            "{kind:?} draft should be valid"
        );
    }
}

#[test]
fn optional_fields_accept_empty_strings() {
    let schema = FormSchema::brand(300.0);
    let mut draft = draft_for(LeadKind::Brand, &brand_payload());
    draft.set_text("productLink", "");
    draft.set_text("description", "");
    draft.clear("keywords");

    for name in ["productLink", "assetsLink", "description", "keywords"] {
        assert!(!schema.field(name).expect("declared").is_required(), "{name}");
        assert_eq!(validate_field(&schema, &draft, name), Validation::Valid, "{name}");
    }
    assert!(schema.field("brandName").expect("declared").is_required());
}

#[test]
fn url_fields_check_format_only_when_present() {
    let schema = FormSchema::brand(300.0);
    let mut draft = LeadDraft::new();
    draft.set_text("productLink", "acme dot com");
    assert_eq!(
        validate_field(&schema, &draft, "productLink"),
        Validation::Invalid("Please enter a valid product link.".to_string())
    );

    draft.set_text("productLink", "ftp://acme.example/file");
    assert!(!validate_field(&schema, &draft, "productLink").is_valid());

    draft.set_text("productLink", "https://acme.example");
    assert!(validate_field(&schema, &draft, "productLink").is_valid());

    let freelancer = FormSchema::freelancer();
    assert!(!validate_field(&freelancer, &LeadDraft::new(), "portfolioLink").is_valid());
}

#[test]
fn text_minimums_count_trimmed_characters() {
    let schema = FormSchema::subscriber();
    let mut draft = LeadDraft::new();
    draft.set_text("name", " A ");
    assert!(!validate_field(&schema, &draft, "name").is_valid());
    draft.set_text("name", "Añ");
    assert!(validate_field(&schema, &draft, "name").is_valid());
}

#[test]
fn email_and_phone_formats() {
    let schema = FormSchema::freelancer();
    let mut draft = LeadDraft::new();

    for bad in ["meera", "meera@", "@studio.example", "meera@studio", "me era@studio.example"] {
        draft.set_text("email", bad);
        assert!(!validate_field(&schema, &draft, "email").is_valid(), "{bad}");
    }
    draft.set_text("email", "meera.shah@studio.example");
    assert!(validate_field(&schema, &draft, "email").is_valid());

    draft.set_text("mobileNumber", "98765");
    assert!(!validate_field(&schema, &draft, "mobileNumber").is_valid());
    draft.set_text("mobileNumber", "98765-4321x");
    assert!(!validate_field(&schema, &draft, "mobileNumber").is_valid());
    draft.set_text("mobileNumber", "+1 (555) 010-2030");
    assert!(validate_field(&schema, &draft, "mobileNumber").is_valid());
}

#[test]
fn choice_and_tag_membership() {
    let schema = FormSchema::freelancer();
    let mut draft = LeadDraft::new();
    draft.set_text("experience", "Guru (20 years)");
    assert!(!validate_field(&schema, &draft, "experience").is_valid());
    draft.set_text("experience", "Expert (5+ years)");
    assert!(validate_field(&schema, &draft, "experience").is_valid());

    assert_eq!(
        validate_field(&schema, &draft, "skills"),
        Validation::Invalid("Please select at least one skill.".to_string())
    );
    draft.toggle_tag("skills", "flutter", true);
    assert!(validate_field(&schema, &draft, "skills").is_valid());
    draft.toggle_tag("skills", "juggling", true);
    assert!(!validate_field(&schema, &draft, "skills").is_valid());
    draft.toggle_tag("skills", "juggling", false);
    draft.toggle_tag("skills", "flutter", false);
    assert!(!validate_field(&schema, &draft, "skills").is_valid());
}

#[test]
fn budget_coerces_input_and_defers_the_bound_check() {
    let schema = FormSchema::brand(300.0);
    let mut draft = LeadDraft::new();

    draft.set_number_input("estimatedBudget", "abc");
    assert_eq!(draft.get("estimatedBudget"), Some(&FieldValue::Number(0.0)));
    assert_eq!(
        validate_field(&schema, &draft, "estimatedBudget"),
        Validation::Invalid(
            "Budget is below the minimum for a collaboration. Minimum is $300.".to_string()
        )
    );

    draft.set_number_input("estimatedBudget", "299.99");
    assert!(!validate_field(&schema, &draft, "estimatedBudget").is_valid());
    draft.set_number_input("estimatedBudget", " 300 ");
    assert!(validate_field(&schema, &draft, "estimatedBudget").is_valid());

    assert_eq!(coerce_number("NaN"), 0.0);
    assert_eq!(coerce_number("inf"), 0.0);
}

#[test]
fn budget_minimum_is_configuration() {
    let schema = FormSchema::brand(200.0);
    let mut draft = LeadDraft::new();
    draft.set_number("estimatedBudget", 250.0);
    assert!(validate_field(&schema, &draft, "estimatedBudget").is_valid());
}

#[test]
fn consent_requires_literal_true() {
    let schema = FormSchema::brand(300.0);
    let mut draft = LeadDraft::new();
    assert!(!validate_field(&schema, &draft, "termsAgreed").is_valid());
    draft.set_text("termsAgreed", "true");
    assert!(!validate_field(&schema, &draft, "termsAgreed").is_valid());
    draft.set_flag("termsAgreed", false);
    assert!(!validate_field(&schema, &draft, "termsAgreed").is_valid());
    draft.set_flag("termsAgreed", true);
    assert!(validate_field(&schema, &draft, "termsAgreed").is_valid());
}

#[test]
fn wrong_shapes_and_unknown_fields_are_invalid_not_panics() {
    let schema = FormSchema::freelancer();
    let draft = LeadDraft::from_json(
        &schema,
        &json!({ "skills": "editing", "fullName": 42, "email": ["a@b.co"] }),
    )
    .expect("object payload");

    assert!(!validate_field(&schema, &draft, "skills").is_valid());
    assert!(!validate_field(&schema, &draft, "fullName").is_valid());
    assert!(!validate_field(&schema, &draft, "email").is_valid());
    assert_eq!(
        validate_field(&schema, &draft, "favouriteColour"),
        Validation::Invalid("unknown field 'favouriteColour'".to_string())
    );
}

#[test]
fn from_json_drops_undeclared_fields_and_coerces_budget_text() {
    let schema = FormSchema::brand(300.0);
    let draft = LeadDraft::from_json(
        &schema,
        &json!({ "brandName": "Acme", "isAdmin": true, "estimatedBudget": "750" }),
    )
    .expect("object payload");

    assert!(draft.get("isAdmin").is_none());
    assert_eq!(draft.number("estimatedBudget"), 750.0);
    assert!(LeadDraft::from_json(&schema, &json!(["not", "an", "object"])).is_err());
}

#[test]
fn brand_defaults_preselect_choices_but_not_consent() {
    let draft = LeadDraft::with_defaults(LeadKind::Brand, 300.0);
    assert_eq!(draft.text("videoType"), "dedicated");
    assert_eq!(draft.text("paymentMethod"), "upi");
    assert_eq!(draft.number("estimatedBudget"), 300.0);
    assert_eq!(draft.flag("termsAgreed"), Some(false));
    assert!(LeadDraft::with_defaults(LeadKind::Subscriber, 300.0).is_empty());
}

#[test]
fn finalize_reports_every_invalid_field() {
    let schema = FormSchema::subscriber();
    let errors = finalize(&schema, &LeadDraft::new()).expect_err("empty draft rejected");
    let fields: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(fields, ["name", "whatsappNumber", "messageType", "message"]);
}

#[test]
fn finalize_builds_typed_brand_record() {
    let schema = FormSchema::brand(300.0);
    let record = finalize(&schema, &draft_for(LeadKind::Brand, &brand_payload()))
        .expect("valid brand draft");

    let LeadRecord::Brand(lead) = record else {
        panic!("expected a brand record");
    };
    assert_eq!(lead.brand_name, "Acme Audio Labs");
    assert_eq!(lead.assets_link, None);
    assert_eq!(lead.keywords.as_deref(), Some("podcast, mic"));
    assert_eq!(lead.platform_labels(), ["YouTube", "Instagram"]);
    assert!(lead.terms_agreed);
    assert!(lead.payment_advisory().is_some());
}
