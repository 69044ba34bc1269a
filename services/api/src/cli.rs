use crate::batch::{run_prioritize, run_score, PrioritizeArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dca_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DCA Case Prioritization Engine",
    about = "Score, rank and route overdue collection cases from the command line or over HTTP",
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
    /// Score a case table with the rule-based engine and print the action queue
    Score(ScoreArgs),
    /// Rank a case table with a trained classifier artifact
    Prioritize(PrioritizeArgs),
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
        Command::Score(args) => run_score(args),
        Command::Prioritize(args) => run_prioritize(args),
    }
}
