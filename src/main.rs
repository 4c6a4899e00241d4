mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Workspace;

#[derive(Parser)]
#[command(name = "notevec")]
#[command(about = "Chunk, embed and semantically search a vault of markdown notes", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Vault root (default: current directory)")]
    root: Option<PathBuf>,
    #[arg(long, global = true, help = "Chunk store file (overrides config; relative paths resolve under <root>/.notevec/)")]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk and embed every note, replacing the chunk store
    Index {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Find the chunks nearest to a query
    #[command(alias = "s")]
    Search {
        /// Query text; prompts on stdin when omitted
        query: Option<String>,
        #[arg(long, short, help = "Number of results")]
        limit: Option<usize>,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Show chunk store statistics
    Status {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// List indexed files with their chunk counts
    Files {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let workspace = Workspace::open(cli.root, cli.store)?;

    match cli.command {
        Commands::Index { json } => commands::index::run(&workspace, json),
        Commands::Search { query, limit, json } => {
            commands::search::run(&workspace, query, limit, json)
        }
        Commands::Status { json } => commands::status::run(&workspace, json),
        Commands::Files { json } => commands::files::run(&workspace, json),
    }
}
