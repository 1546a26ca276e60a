//! Tangler CLI - Literate Programming Tangler

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tangler::commands;
use tangler::config::{self, ConfigUpdate, ResolutionPolicy};
use tangler::interface::Context;

#[derive(Parser)]
#[command(name = "tangler")]
#[command(author, version, about = "Literate programming tangler", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// How references to multiply-defined chunks are resolved
    #[arg(long, global = true, value_enum)]
    resolution: Option<ResolutionPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract code from a literate document
    Tangle {
        /// Source document
        #[arg(value_name = "SOURCE")]
        file: PathBuf,

        /// Chunks to emit (default: the root chunk, else every chunk with an `out` path)
        #[arg(value_name = "CHUNK")]
        chunks: Vec<String>,

        /// Dry run - show what would be done without doing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List the chunks a document defines
    List {
        /// Source document
        #[arg(value_name = "SOURCE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging on stderr, keeping stdout for tangled output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let file_config = match config::load_config(&base_dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Command-line flags override the config file
    let overrides = ConfigUpdate {
        resolution: cli.resolution,
        ..ConfigUpdate::default()
    };
    let ctx = Context::new(overrides.merge_into(&file_config), base_dir);

    let result = match cli.command {
        Commands::Tangle {
            file,
            chunks,
            dry_run,
        } => {
            let options = commands::TangleOptions {
                file,
                chunks,
                dry_run,
            };
            commands::tangle(&ctx, options)
        }

        Commands::List { file, json } => {
            let options = commands::ListOptions { file, json };
            commands::list(&ctx, options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
