use crate::commands::{run_compliance_alerts, run_compliance_report, run_match, ComplianceArgs, MatchArgs};
use crate::server;
use care_match::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Care Match",
    about = "Rank support workers for service requests and track credential compliance",
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
    /// Rank candidate workers for a service request read from a JSON file
    Match(MatchArgs),
    /// Inspect worker credential compliance
    Compliance {
        #[command(subcommand)]
        command: ComplianceCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ComplianceCommand {
    /// List expiry alerts, most urgent first
    Alerts(ComplianceArgs),
    /// Summarise compliance rates per document type
    Report(ComplianceArgs),
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Compliance {
            command: ComplianceCommand::Alerts(args),
        } => run_compliance_alerts(args),
        Command::Compliance {
            command: ComplianceCommand::Report(args),
        } => run_compliance_report(args),
    }
}
