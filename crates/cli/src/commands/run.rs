use anyhow::{Context, Result};
use chore_core::execution::TaskRunner;
use chore_core::registry::{TaskId, TaskRegistry};
use colored::*;

pub fn execute(registry: &TaskRegistry, target: &str) -> Result<()> {
    println!("{} {}", "Running task".bold(), target.cyan());

    let target = TaskId::parse(target);
    TaskRunner::new(registry)
        .run(&target)
        .context("Failed to run task")?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        "All tasks completed successfully!".green().bold()
    );

    Ok(())
}
