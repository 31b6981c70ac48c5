use crate::report::{run_estimate, run_roster, EstimateArgs, RosterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use school_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "School Insights",
    about = "Estimate school attendance, classify alerts and compose regional insight reports",
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
    /// Estimate attendance for one school and print its alerts and narrative report
    Estimate(EstimateArgs),
    /// Import a CSV roster and print one attendance line per school
    Roster(RosterArgs),
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
        Command::Estimate(args) => run_estimate(args).await,
        Command::Roster(args) => run_roster(args),
    }
}
