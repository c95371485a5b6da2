use crate::infra::{InMemoryLeadStore, LoggingOutbox};
use clap::Args;
use creator_leads::config::AppConfig;
use creator_leads::error::AppError;
use creator_leads::intake::{
    write_csv, IntakeSettings, LeadIntakeService, LeadKind, SubmitOutcome,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the stored leads as CSV after the walkthrough
    #[arg(long)]
    pub(crate) csv: bool,
    /// Use built-in intake settings instead of reading the environment
    #[arg(long)]
    pub(crate) defaults: bool,
}

fn sample_payload(kind: LeadKind) -> Value {
    match kind {
        LeadKind::Subscriber => json!({
            "name": "Ravi Kumar",
            "whatsappNumber": "+91 98765 43210",
            "messageType": "Product questions",
            "message": "Which microphone do you use for the Flutter tutorials?",
        }),
        LeadKind::Freelancer => json!({
            "fullName": "Meera Shah",
            "email": "meera@studio.example",
            "mobileNumber": "9876543210",
            "portfolioLink": "https://meera.example/portfolio",
            "skills": ["editing", "thumbnails"],
            "experience": "Intermediate (1-3 years)",
            "description": "Three years cutting long-form tech reviews and shorts.",
        }),
        LeadKind::Brand => json!({
            "brandName": "Acme Audio Labs",
            "contactPerson": "Dana Cole",
            "workEmail": "dana@acme.example",
            "productLink": "https://acme.example/mic",
            "videoType": "integrated",
            "productType": "physical",
            "platforms": ["youtube", "instagram"],
            "description": "Launch of our new USB microphone.",
            "estimatedBudget": 850,
            "country": "India",
            "paymentMethod": "paypal",
            "termsAgreed": true,
        }),
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let settings = if args.defaults {
        IntakeSettings::default()
    } else {
        AppConfig::load()?.intake
    };

    let store = Arc::new(InMemoryLeadStore::default());
    let outbox = Arc::new(LoggingOutbox::default());
    let service = Arc::new(LeadIntakeService::new(store.clone(), outbox.clone(), settings));

    println!("Lead intake demo");
    for kind in LeadKind::ALL {
        let form = service.open_form(kind);
        println!(
            "\n[{}] {} step(s): {}",
            kind.label(),
            form.step_count(),
            form.schema()
                .steps
                .iter()
                .map(|step| step.name)
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        if let Err(err) = form.load_json(&sample_payload(kind)) {
            println!("  Draft rejected: {err}");
            continue;
        }

        match form.submit().await {
            SubmitOutcome::Submitted(mut success) => {
                println!("  Stored as {}", success.lead_id.0);
                println!("  {}", success.message);
                if let Some(tier) = &success.tier {
                    println!("  Tier: {} ({:.1}%)", tier.label, tier.progress);
                }
                if let Some(receipt) = &success.receipt {
                    println!(
                        "  Receipt: {} ({} page(s), {} bytes)",
                        receipt.filename,
                        receipt.page_count,
                        receipt.body.len()
                    );
                }
                println!(
                    "  Redirect to {} after {}s (cancelled for the demo)",
                    success.redirect.target(),
                    success.redirect.delay().as_secs()
                );
                success.redirect.cancel();
            }
            SubmitOutcome::Rejected(errors) => {
                println!("  Rejected:");
                for error in errors {
                    println!("    {}: {}", error.field, error.reason);
                }
            }
            SubmitOutcome::Failed { message } => println!("  Failed: {message}"),
            SubmitOutcome::AlreadyInFlight | SubmitOutcome::AlreadySubmitted => {
                println!("  Submission already handled");
            }
        }
    }

    // Confirmations are sent from detached tasks.
    tokio::time::sleep(Duration::from_millis(50)).await;

    println!("\nStored leads");
    for kind in LeadKind::ALL {
        println!("  {:<22} {}", kind.collection(), store.count_in(kind.collection()));
    }

    println!("\nOutbound email");
    for message in outbox.sent() {
        println!("  {:?} -> {}: {}", message.audience, message.to, message.subject);
    }

    if args.csv {
        println!();
        write_csv(std::io::stdout().lock(), &store.documents())?;
    }

    Ok(())
}
