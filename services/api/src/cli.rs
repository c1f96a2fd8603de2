use crate::infra::load_request;
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use visa_checklist::config::AppConfig;
use visa_checklist::error::AppError;
use visa_checklist::workflows::visa::{
    ChecklistService, EligibilityResolver, LocalChecklistBackend, RiskDecision, RiskFactor,
};

#[derive(Parser, Debug)]
#[command(
    name = "Visa Checklist",
    about = "Resolve visa questionnaire answers and compile document checklists",
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
    /// Print legal options, corrections, and diagnostics for a profile
    Resolve(ResolveArgs),
    /// Finalize a profile and print its document checklist
    Checklist(ChecklistArgs),
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
pub(crate) struct ResolveArgs {
    /// Applicant profile as a JSON file
    pub(crate) profile: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ChecklistArgs {
    /// Applicant profile as a JSON file
    pub(crate) profile: PathBuf,
    /// Affirm a risk factor to keep a multiple-entry request (repeatable)
    #[arg(long = "acknowledge", value_parser = parse_risk_factor)]
    pub(crate) acknowledge: Vec<RiskFactor>,
    /// Downgrade a first-time multiple-entry request to a single-entry visa
    #[arg(long, conflicts_with = "acknowledge")]
    pub(crate) downgrade: bool,
    /// Print the checklist as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_risk_factor(raw: &str) -> Result<RiskFactor, String> {
    raw.parse()
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Resolve(args) => run_resolve(args),
        Command::Checklist(args) => run_checklist(args),
    }
}

fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let request = load_request(&args.profile)?;

    let resolution = EligibilityResolver::new(config.eligibility).resolve(&request.profile);
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn run_checklist(args: ChecklistArgs) -> Result<(), AppError> {
    let ChecklistArgs {
        profile,
        acknowledge,
        downgrade,
        json,
    } = args;

    let config = AppConfig::load()?;
    let mut request = load_request(&profile)?;
    if downgrade {
        request.risk_decision = Some(RiskDecision::DowngradeToSingle);
    } else if !acknowledge.is_empty() {
        request.risk_decision = Some(RiskDecision::Acknowledge {
            factors: acknowledge,
        });
    }

    let service = ChecklistService::new(Arc::new(LocalChecklistBackend::new()), config.eligibility);
    let checklist = service.submit(request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&checklist)?);
    } else {
        print!("{checklist}");
    }
    Ok(())
}
