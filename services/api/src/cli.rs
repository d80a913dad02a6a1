use crate::commands::{
    backfill_metadata, list_topics, print_contract, print_recovery, show_topic, verify_topics,
    ContractArgs, ListArgs, RecoveryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use decision_bridge::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Decision Bridge",
    about = "Compile travel decision topics and serve the decision-engine contract",
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
    /// Inspect compiled topics
    Topics {
        #[command(subcommand)]
        command: TopicsCommand,
    },
    /// Check topic content for coverage defects; exits non-zero on any issue
    Verify,
    /// Print the request contract for a topic
    Contract(ContractArgs),
    /// Print refusal-recovery guidance for a topic
    Recovery(RecoveryArgs),
}

#[derive(Subcommand, Debug)]
enum TopicsCommand {
    /// List compiled topics with their context lines
    List(ListArgs),
    /// Print one compiled topic record as JSON
    Show {
        /// Topic slug
        slug: String,
    },
    /// Print inferred metadata for definitions that carry none
    Backfill,
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
        Command::Topics { command } => match command {
            TopicsCommand::List(args) => list_topics(args),
            TopicsCommand::Show { slug } => show_topic(&slug),
            TopicsCommand::Backfill => backfill_metadata(),
        },
        Command::Verify => verify_topics(),
        Command::Contract(args) => print_contract(args),
        Command::Recovery(args) => print_recovery(args),
    }
}
