//! personfind CLI
//!
//! Console transport and maintenance commands for the person store.

use clap::{Parser, Subcommand};
use log::error;
use personfind_core::{default_log_level, init_logging};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "personfind")]
#[command(about = "Person record lookup over a SQLite store", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "PERSONFIND_DB")]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "PERSONFIND_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when omitted
    #[arg(long, env = "PERSONFIND_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Answer commands read line by line from stdin
    Serve,
    /// Answer a single command, e.g. `query /search Smith John`
    Query(commands::serve::QueryArgs),
    /// Load a `;`-delimited export into the database
    Import(commands::import::ImportArgs),
    /// Recompute contacts.info_reversed from contacts.info
    ReverseContacts,
}

fn main() {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, cli.log_dir.as_deref()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Serve => commands::serve::execute_serve(&cli.db),
        Commands::Query(args) => commands::serve::execute_query(&cli.db, args),
        Commands::Import(args) => commands::import::execute_import(&cli.db, args),
        Commands::ReverseContacts => commands::import::execute_reverse_contacts(&cli.db),
    };

    if let Err(e) = result {
        error!("event=cli_exit module=cli status=error error={e}");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
