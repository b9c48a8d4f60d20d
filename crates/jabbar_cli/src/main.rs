use clap::{Parser, Subcommand};

mod commands;
mod errors;
mod render;

use commands::report_cmd::{Action, ReportArgs};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Jabbar CLI: report who watches, stars, and forks a GitHub repository
#[derive(Parser)]
#[command(name = "jabbar")]
#[command(about = "Report who watches, stars, and forks a GitHub repository", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the users watching a repository
    Watchers(ReportArgs),

    /// Report the users who starred a repository
    Stargazers(ReportArgs),

    /// Report the users and organizations that forked a repository
    Forkers(ReportArgs),

    /// Combine watchers, stargazers, and forkers into one report
    All(ReportArgs),
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("JABBAR_LOG"))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Watchers(args) => commands::report_cmd::execute(Action::Watchers, args).await,
        Commands::Stargazers(args) => commands::report_cmd::execute(Action::Stargazers, args).await,
        Commands::Forkers(args) => commands::report_cmd::execute(Action::Forkers, args).await,
        Commands::All(args) => commands::report_cmd::execute(Action::All, args).await,
    };

    if let Err(e) = result {
        error!("Error: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
