use crate::reports::{run_compare, run_dashboard, CompareArgs, DashboardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use workforce_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Workforce Insights",
    about = "Serve and query labor-market skill gap analytics from the command line",
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
    /// Summarize the offline skill gap dataset
    Dashboard(DashboardArgs),
    /// Compare a resume against an occupation's skills and live postings
    Compare(CompareArgs),
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
        Command::Dashboard(args) => run_dashboard(args),
        Command::Compare(args) => run_compare(args).await,
    }
}
