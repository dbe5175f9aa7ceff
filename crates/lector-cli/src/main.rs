//! CLI application for CFDI reading and quotation-letter generation.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, letter, read, store};

/// CFDI reader - extract invoice details and generate quotation letters
#[derive(Parser)]
#[command(name = "lector")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a single CFDI file and print its details
    Read(read::ReadArgs),

    /// Generate a quotation letter from a CFDI file
    Letter(letter::LetterArgs),

    /// Read multiple CFDI files
    Batch(batch::BatchArgs),

    /// Work with the remote document store
    Store(store::StoreArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Read(args) => read::run(args, cli.config.as_deref()),
        Commands::Letter(args) => letter::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::Store(args) => store::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
