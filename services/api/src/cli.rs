use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use creator_leads::config::AppConfig;
use creator_leads::error::AppError;
use creator_leads::intake::coerce_number;

#[derive(Parser, Debug)]
#[command(
    name = "Creator Leads",
    about = "Serve and exercise the creator partnership lead intake from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Show the collaboration tier for a brand budget
    Tier(TierArgs),
    /// Submit one subscriber, freelancer and brand lead against in-memory collaborators
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct TierArgs {
    /// Budget in USD as typed into the form; non-numeric input counts as 0
    #[arg(long)]
    pub(crate) budget: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Tier(args) => run_tier(args),
        Command::Demo(args) => run_demo(args).await,
    }
}

fn run_tier(args: TierArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let budget = coerce_number(&args.budget);
    let placement = config.intake.tiers.classify(budget);
    println!(
        "${budget:.2} -> {} ({:.1}% of the tier scale)",
        placement.label, placement.progress
    );
    if budget < config.intake.brand_minimum_budget {
        println!(
            "Below the ${:.0} minimum for a brand collaboration.",
            config.intake.brand_minimum_budget
        );
    }
    Ok(())
}
