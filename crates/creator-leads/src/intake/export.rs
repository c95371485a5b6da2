use std::io;

use serde::Serialize;

use super::domain::{LeadDocument, LeadId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    submission_date: String,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    summary: String,
    budget: Option<f64>,
    lead_score: Option<f64>,
}

/// Write stored leads as CSV, one row per document, oldest first as given.
pub fn write_csv<W: io::Write>(
    writer: W,
    documents: &[(LeadId, LeadDocument)],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (id, document) in documents {
        let record = &document.record;
        csv_writer.serialize(ExportRow {
            id: &id.0,
            kind: record.kind().label(),
            submission_date: document.submission_date.to_rfc3339(),
            name: record.display_name(),
            email: record.contact_email().unwrap_or_default(),
            phone: record.contact_phone().unwrap_or_default(),
            summary: record.summary(),
            budget: record.budget(),
            lead_score: document.analysis.as_ref().map(|analysis| analysis.lead_score),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::intake::domain::{LeadAnalysis, LeadRecord, MessageCategory, SubscriberLead};

    #[test]
    fn writes_header_and_one_row_per_lead() {
        let document = LeadDocument {
            record: LeadRecord::Subscriber(SubscriberLead {
                name: "Asha".to_string(),
                whatsapp_number: "+91 98765 43210".to_string(),
                message_type: MessageCategory::Feedback,
                message: "Loved the last video".to_string(),
            }),
            submission_date: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
            analysis: Some(LeadAnalysis {
                lead_score: 0.4,
                reasoning: "n/a".to_string(),
            }),
        };

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[(LeadId("lead-1".to_string()), document)]).expect("csv");
        let output = String::from_utf8(buffer).expect("utf8");
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("id,type,submissionDate,name,email,phone,summary,budget,leadScore")
        );
        let row = lines.next().expect("data row");
        assert!(row.starts_with("lead-1,subscriber,2026-03-01T09:30:00+00:00,Asha,,"));
        assert!(row.contains("Feedback: Loved the last video"));
        assert!(row.ends_with(",,0.4"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_export_writes_nothing() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).expect("csv");
        assert!(buffer.is_empty());
    }
}
