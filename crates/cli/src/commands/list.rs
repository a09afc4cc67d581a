use anyhow::Result;
use chore_core::registry::TaskRegistry;
use chore_core::tasks::get_task_color;
use colored::*;

pub fn execute(registry: &TaskRegistry) -> Result<()> {
    println!("{}", "Tasks".bold().underline());

    if registry.is_empty() {
        println!("  {}", "No tasks registered".dimmed());
        return Ok(());
    }

    let mut tasks: Vec<_> = registry.iter().collect();
    tasks.sort_by_key(|task| task.id.to_string());

    let width = tasks
        .iter()
        .map(|task| task.id.to_string().len())
        .max()
        .unwrap_or(0);

    for task in tasks {
        let label = task.id.to_string();
        let marker = if registry.default_task() == Some(&task.id) {
            "*"
        } else {
            " "
        };

        // Pad before coloring so the escape codes don't skew the column
        let padded = format!("{:width$}", label);
        println!(
            "{} {}  {}",
            marker,
            padded.color(get_task_color(&task.id.name)).bold(),
            task.description.dimmed(),
        );
    }

    println!();
    println!("{}", "* default task".dimmed());

    Ok(())
}
