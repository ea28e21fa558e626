//! IdentX CLI
//!
//! Command-line interface for tenant management and queries

use clap::{Parser, Subcommand};
use identx_core::core_types::{RequestContext, TraceId};
use identx_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "identx")]
#[command(about = "IdentX - Tenant identity management", long_about = None)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, default_value = ".identx/identity.db")]
    db: PathBuf,

    /// Logging profile (dev, prod or test)
    #[arg(long, global = true, default_value = "dev")]
    log: Profile,

    /// Trace id to attach to every log event of this invocation
    #[arg(long = "trace-id", global = true)]
    trace_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Tenant operations
    Tenant(commands::tenant::TenantArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log);

    let mut context = RequestContext::new();
    if let Some(trace_id) = cli.trace_id {
        context = context.with_trace_id(TraceId::from(trace_id));
    }

    let result = match cli.command {
        Commands::Tenant(args) => commands::tenant::execute(args, &cli.db, context),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
