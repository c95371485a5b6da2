use super::collaborators::{Audience, EmailMessage};
use super::domain::{
    BrandLead, ChoiceOption, FreelancerLead, LeadAnalysis, LeadRecord, SubscriberLead,
};
use super::markup::{escape_html, format_usd};
use super::settings::IntakeSettings;

const ADMIN_SENDER_NAME: &str = "YBT Connect";
const CREATOR_SENDER_NAME: &str = "You B Tech";

/// Internal notification describing the new lead.
pub(crate) fn admin_notification(
    record: &LeadRecord,
    analysis: Option<&LeadAnalysis>,
    settings: &IntakeSettings,
) -> EmailMessage {
    let (subject, mut html_body) = match record {
        LeadRecord::Subscriber(lead) => subscriber_admin_body(lead),
        LeadRecord::Freelancer(lead) => freelancer_admin_body(lead),
        LeadRecord::Brand(lead) => brand_admin_body(lead),
    };

    if let Some(analysis) = analysis {
        html_body.push_str(&format!(
            "<hr><h2>Lead Quality:</h2><p><strong>Score:</strong> {:.0}%</p><p>{}</p>",
            analysis.lead_score * 100.0,
            escape_html(&analysis.reasoning)
        ));
    }

    EmailMessage {
        audience: Audience::Admin,
        from: format!("\"{ADMIN_SENDER_NAME}\" <{}>", settings.sender),
        to: settings.admin_email.clone(),
        subject,
        html_body,
    }
}

/// Confirmation copy for the submitter. Subscribers leave no e-mail address, so they get none.
pub(crate) fn submitter_confirmation(
    record: &LeadRecord,
    settings: &IntakeSettings,
) -> Option<EmailMessage> {
    let (to, subject, html_body) = match record {
        LeadRecord::Subscriber(_) => return None,
        LeadRecord::Freelancer(lead) => (
            lead.email.clone(),
            "We Have Received Your Freelancer Application".to_string(),
            freelancer_confirmation_body(lead),
        ),
        LeadRecord::Brand(lead) => (
            lead.work_email.clone(),
            "Your Collaboration Inquiry with You B Tech has been Received".to_string(),
            brand_confirmation_body(lead),
        ),
    };

    Some(EmailMessage {
        audience: Audience::Submitter,
        from: format!("\"{CREATOR_SENDER_NAME}\" <{}>", settings.sender),
        to,
        subject,
        html_body,
    })
}

fn subscriber_admin_body(lead: &SubscriberLead) -> (String, String) {
    let subject = format!(
        "[Subscriber - {}] New Message from {}",
        lead.message_type.label(),
        lead.name
    );
    let body = format!(
        "<h1>New Subscriber Message</h1>\
         <p>A new message has been submitted through the connect form.</p><hr>\
         <h2>Details:</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>WhatsApp Number:</strong> {}</p>\
         <p><strong>Message Type:</strong> {}</p>\
         <p><strong>Message:</strong></p><p>{}</p>",
        escape_html(&lead.name),
        escape_html(&lead.whatsapp_number),
        escape_html(lead.message_type.label()),
        escape_html(&lead.message),
    );
    (subject, body)
}

fn freelancer_admin_body(lead: &FreelancerLead) -> (String, String) {
    let subject = format!("[Freelancer] New Application from {}", lead.full_name);
    let skills: Vec<&str> = lead.skills.iter().map(|skill| skill.label()).collect();
    let portfolio = escape_html(&lead.portfolio_link);
    let body = format!(
        "<h1>New Freelancer Application</h1>\
         <p>A new freelancer has applied to work with you.</p><hr>\
         <h2>Applicant Details:</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Mobile:</strong> {}</p>\
         <p><strong>Portfolio:</strong> <a href=\"{portfolio}\">{portfolio}</a></p><hr>\
         <h2>Application Details:</h2>\
         <p><strong>Skills:</strong> {}</p>\
         <p><strong>Experience:</strong> {}</p>\
         <p><strong>Description:</strong></p><p>{}</p>",
        escape_html(&lead.full_name),
        escape_html(&lead.email),
        escape_html(&lead.mobile_number),
        escape_html(&skills.join(", ")),
        escape_html(lead.experience.label()),
        escape_html(&lead.description),
    );
    (subject, body)
}

fn brand_admin_body(lead: &BrandLead) -> (String, String) {
    let subject = format!("[Brand] New Collaboration Inquiry from {}", lead.brand_name);
    let product_link = lead
        .product_link
        .as_deref()
        .map(|link| {
            let link = escape_html(link);
            format!("<a href=\"{link}\">{link}</a>")
        })
        .unwrap_or_else(|| "N/A".to_string());
    let body = format!(
        "<h1>New Brand Collaboration Inquiry</h1>\
         <p>A new brand has submitted an inquiry for collaboration.</p><hr>\
         <h2>Brand Details:</h2>\
         <p><strong>Brand Name:</strong> {}</p>\
         <p><strong>Contact Person:</strong> {}</p>\
         <p><strong>Work Email:</strong> {}</p>\
         <p><strong>Product Link:</strong> {product_link}</p><hr>\
         <h2>Campaign Details:</h2>\
         <p><strong>Video Type:</strong> {}</p>\
         <p><strong>Product Type:</strong> {}</p>\
         <p><strong>Platforms:</strong> {}</p>\
         <p><strong>Description:</strong> {}</p><hr>\
         <h2>Budget &amp; Logistics:</h2>\
         <p><strong>Estimated Budget:</strong> {}</p>\
         <p><strong>Country:</strong> {}</p>\
         <p><strong>Payment Method:</strong> {}</p>",
        escape_html(&lead.brand_name),
        escape_html(&lead.contact_person),
        escape_html(&lead.work_email),
        lead.video_type.label(),
        lead.product_type.label(),
        lead.platform_labels().join(", "),
        escape_html(lead.description.as_deref().unwrap_or("N/A")),
        format_usd(lead.estimated_budget),
        escape_html(&lead.country),
        lead.payment_method.label(),
    );
    (subject, body)
}

fn freelancer_confirmation_body(lead: &FreelancerLead) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; line-height: 1.6;\">\
         <h2>Your Application to Work with You B Tech has been Received!</h2>\
         <p>Hello {},</p>\
         <p>Thank you for applying to join our network of talented freelancers. \
         We have successfully received your application.</p>\
         <p>Our team will review your portfolio and experience. If your skills match our current \
         needs, we will contact you within <strong>24-72 hours</strong> regarding next steps.</p>\
         <p>We appreciate your interest in collaborating with us!</p>\
         <p>Best regards,</p><p><strong>Brajendra</strong></p><p>Creator, You B Tech</p></div>",
        escape_html(&lead.full_name)
    )
}

fn brand_confirmation_body(lead: &BrandLead) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; line-height: 1.6;\">\
         <h2>Thank You for Your Interest in Collaborating with You B Tech!</h2>\
         <p>Hello {},</p>\
         <p>We have successfully received your collaboration inquiry for <strong>{}</strong>. \
         We appreciate you considering us for your campaign.</p>\
         <p>Our team will review the details you provided and get back to you within 24-48 hours \
         with a formal proposal or any follow-up questions.</p>\
         <p>In the meantime, feel free to browse our \
         <a href=\"https://youtube.com/@you_b_tech\">YouTube channel</a> \
         to see more of our work.</p>\
         <p>Best regards,</p><p><strong>Brajendra</strong></p><p>Creator, You B Tech</p></div>",
        escape_html(&lead.contact_person),
        escape_html(&lead.brand_name)
    )
}
