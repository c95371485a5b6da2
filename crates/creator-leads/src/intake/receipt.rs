use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{BrandLead, ChoiceOption};
use super::markup::{escape_html, format_usd};

const FILENAME_PREFIX: &str = "YBT_Inquiry";
const FOOTER_NOTICE: &str = "This is a preliminary inquiry, not a binding contract.";
const CLOSING_NOTE: &str = "Thank you for your interest in collaborating with You B Tech. We will review your inquiry and respond within 48 hours.";

static LAST_INQUIRY_MILLIS: AtomicI64 = AtomicI64::new(0);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InquiryId(pub String);

/// Timestamp-derived id, bumped past the previous one so ids never repeat within the process.
pub fn next_inquiry_id(now: DateTime<Utc>) -> InquiryId {
    let requested = now.timestamp_millis();
    let previous = LAST_INQUIRY_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(requested.max(last + 1))
        })
        .unwrap_or(requested - 1);
    let issued = requested.max(previous + 1);
    InquiryId(format!("YBT-{issued}"))
}

/// `YBT_Inquiry_<brand>_<id>.html` with whitespace runs in the brand collapsed to `_`.
pub fn receipt_filename(brand_name: &str, inquiry_id: &InquiryId) -> String {
    let sanitized = brand_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{FILENAME_PREFIX}_{sanitized}_{}.html", inquiry_id.0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptBranding {
    pub company: String,
    pub tagline: String,
    pub contact_email: String,
}

impl Default for ReceiptBranding {
    fn default() -> Self {
        Self {
            company: "You B Tech".to_string(),
            tagline: "Digital Content & Brand Partnerships".to_string(),
            contact_email: "youbtechcode@gmail.com".to_string(),
        }
    }
}

/// Downloadable receipt produced after a brand inquiry is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptArtifact {
    pub inquiry_id: InquiryId,
    pub filename: String,
    pub content_type: String,
    pub page_count: usize,
    pub body: String,
}

/// Fixed layout before rendering; one entry in `pages` per printed page of the campaign table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLayout {
    pub inquiry_id: InquiryId,
    pub issued_on: String,
    pub client_lines: Vec<String>,
    pub pages: Vec<Vec<(String, String)>>,
    pub summary: Vec<(String, String)>,
    pub total: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("failed to render receipt: {0}")]
    Render(#[from] fmt::Error),
}

#[derive(Debug, Clone)]
pub struct ReceiptGenerator {
    branding: ReceiptBranding,
    rows_per_page: usize,
}

impl ReceiptGenerator {
    pub fn new(branding: ReceiptBranding, rows_per_page: usize) -> Self {
        Self {
            branding,
            rows_per_page: rows_per_page.max(1),
        }
    }

    pub fn generate(
        &self,
        lead: &BrandLead,
        issued_at: DateTime<Utc>,
    ) -> Result<ReceiptArtifact, ReceiptError> {
        let inquiry_id = next_inquiry_id(issued_at);
        self.render(lead, inquiry_id, issued_at)
    }

    pub fn render(
        &self,
        lead: &BrandLead,
        inquiry_id: InquiryId,
        issued_at: DateTime<Utc>,
    ) -> Result<ReceiptArtifact, ReceiptError> {
        let layout = self.layout(lead, inquiry_id, issued_at);
        let body = self.render_html(&layout)?;

        Ok(ReceiptArtifact {
            filename: receipt_filename(&lead.brand_name, &layout.inquiry_id),
            content_type: mime::TEXT_HTML_UTF_8.to_string(),
            page_count: layout.pages.len(),
            inquiry_id: layout.inquiry_id,
            body,
        })
    }

    pub fn layout(
        &self,
        lead: &BrandLead,
        inquiry_id: InquiryId,
        issued_at: DateTime<Utc>,
    ) -> ReceiptLayout {
        let mut rows = vec![
            ("Video Type".to_string(), lead.video_type.label().to_string()),
            (
                "Product Type".to_string(),
                lead.product_type.label().to_string(),
            ),
            (
                "Target Platforms".to_string(),
                lead.platform_labels().join(", "),
            ),
            (
                "Campaign Description".to_string(),
                lead.description.clone().unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "Brand/Product URL".to_string(),
                lead.product_link.clone().unwrap_or_else(|| "N/A".to_string()),
            ),
        ];
        if let Some(assets) = &lead.assets_link {
            rows.push(("Assets".to_string(), assets.clone()));
        }
        if let Some(keywords) = &lead.keywords {
            rows.push(("Keywords".to_string(), keywords.clone()));
        }

        let pages = rows
            .chunks(self.rows_per_page)
            .map(<[(String, String)]>::to_vec)
            .collect();

        let mut summary = vec![
            (
                "Estimated Budget (USD)".to_string(),
                format_usd(lead.estimated_budget),
            ),
            (
                "Payment Method".to_string(),
                lead.payment_method.label().to_string(),
            ),
        ];
        if let Some(advisory) = lead.payment_advisory() {
            summary.push(("Note".to_string(), advisory.to_string()));
        }

        ReceiptLayout {
            inquiry_id,
            issued_on: issued_at.format("%B %-d, %Y").to_string(),
            client_lines: vec![
                lead.brand_name.clone(),
                lead.contact_person.clone(),
                lead.work_email.clone(),
                lead.country.clone(),
            ],
            pages,
            summary,
            // The total is the submitted budget as-is.
            total: format_usd(lead.estimated_budget),
        }
    }

    fn render_html(&self, layout: &ReceiptLayout) -> Result<String, fmt::Error> {
        let mut html = String::new();
        let page_count = layout.pages.len();

        writeln!(
            html,
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Collaboration Inquiry {}</title></head><body>",
            escape_html(&layout.inquiry_id.0)
        )?;

        for (index, rows) in layout.pages.iter().enumerate() {
            let page_number = index + 1;
            writeln!(html, "<section class=\"page\" data-page=\"{page_number}\">")?;

            if index == 0 {
                self.render_header(&mut html, layout)?;
            }

            html.push_str("<table><thead><tr><th>Service Description</th><th>Details</th></tr></thead><tbody>");
            for (label, value) in rows {
                writeln!(
                    html,
                    "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
                    escape_html(label),
                    escape_html(value)
                )?;
            }
            html.push_str("</tbody></table>");

            if page_number == page_count {
                render_summary(&mut html, layout)?;
            }

            writeln!(
                html,
                "<footer><span>Inquiry ID: {}</span> <span>{FOOTER_NOTICE}</span> <span>Page {page_number}</span></footer></section>",
                escape_html(&layout.inquiry_id.0)
            )?;
        }

        html.push_str("</body></html>");
        Ok(html)
    }

    fn render_header(&self, html: &mut String, layout: &ReceiptLayout) -> fmt::Result {
        writeln!(html, "<header><h1>Collaboration Inquiry</h1>")?;
        writeln!(
            html,
            "<div class=\"branding\"><p>{}</p><p>{}</p><p>{}</p></div>",
            escape_html(&self.branding.company),
            escape_html(&self.branding.tagline),
            escape_html(&self.branding.contact_email)
        )?;
        writeln!(
            html,
            "<div class=\"meta\"><p>Inquiry ID: {}</p><p>Date: {}</p></div></header>",
            escape_html(&layout.inquiry_id.0),
            escape_html(&layout.issued_on)
        )?;

        html.push_str("<div class=\"client\"><h2>INQUIRY FROM (CLIENT)</h2>");
        for line in &layout.client_lines {
            writeln!(html, "<p>{}</p>", escape_html(line))?;
        }
        html.push_str("</div>");
        Ok(())
    }
}

fn render_summary(html: &mut String, layout: &ReceiptLayout) -> fmt::Result {
    html.push_str("<div class=\"summary\"><dl>");
    for (label, value) in &layout.summary {
        writeln!(
            html,
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(label),
            escape_html(value)
        )?;
    }
    writeln!(
        html,
        "<dt><strong>TOTAL ESTIMATE</strong></dt><dd><strong>{}</strong></dd></dl></div>",
        escape_html(&layout.total)
    )?;
    writeln!(html, "<p class=\"closing\">{}</p>", escape_html(CLOSING_NOTE))
}
