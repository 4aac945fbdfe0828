use crate::commands::{run_lookup, run_score, LookupArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dotrepute::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DotRepute",
    about = "Score Polkadot account reputation from on-chain signals",
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
    /// Score a snapshot JSON file offline with the rule-based rubric
    Score(ScoreArgs),
    /// Fetch live on-chain signals for an address and print its rule-based score
    Lookup(LookupArgs),
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
        Command::Lookup(args) => run_lookup(args).await,
    }
}
