use thiserror::Error;

use crate::registry::TaskId;

/// The main error type for Chore operations
#[derive(Debug, Error)]
pub enum ChoreError {
    #[error("Task '{0}' is not registered")]
    UnknownTask(TaskId),

    #[error("Task '{0}' is already registered")]
    DuplicateTask(TaskId),

    #[error("Cyclic dependency detected: {}", format_cycle(.0))]
    CyclicDependency(Vec<TaskId>),

    #[error("Task '{task}' failed")]
    TaskExecution {
        task: TaskId,
        #[source]
        source: anyhow::Error,
    },
}

/// Result type alias for Chore operations
pub type ChoreResult<T> = Result<T, ChoreError>;

fn format_cycle(cycle: &[TaskId]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
