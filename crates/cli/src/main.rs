use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod steps;

/// Chore - a dependency-resolving build-step runner
#[derive(Parser)]
#[command(name = "chore")]
#[command(about = "Run named build steps and their prerequisites")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available tasks
    List,
    /// Run a task in the format "namespace:task" or just "task"
    Run {
        /// Target task, e.g. "build" or "test:unit"
        target: String,
    },
}

fn main() -> Result<()> {
    // Build the registry of bundled build steps up front; the table is
    // read-only from here on.
    let registry =
        steps::registry().map_err(|e| anyhow::anyhow!("Failed to register build steps: {}", e))?;

    // With no subcommand, run the default task when one is set, otherwise
    // fall back to listing what is available.
    match Cli::parse().command {
        Some(Commands::List) => commands::list::execute(&registry),
        Some(Commands::Run { target }) => commands::run::execute(&registry, &target),
        None => match registry.default_task() {
            Some(default) => {
                let target = default.to_string();
                commands::run::execute(&registry, &target)
            }
            None => commands::list::execute(&registry),
        },
    }
}
