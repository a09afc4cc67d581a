//! Dependency-resolving task runner
//!
//! This module provides the main task execution logic: depth-first resolution
//! of the dependency closure, run-once memoization, cycle detection, and
//! fail-fast error propagation.

use std::collections::HashMap;

use colored::*;

use crate::registry::{TaskId, TaskRegistry};
use crate::tasks::get_task_color;
use crate::types::{ChoreError, ChoreResult};

/// Per-task outcome within a single invocation. A task with no entry has not
/// started yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecState {
    InProgress,
    Completed,
}

/// Execution record for one top-level invocation.
///
/// Created fresh by every [`TaskRunner::run`] call and discarded when it
/// returns, so a task that failed in one invocation may be retried by the
/// next one.
#[derive(Default)]
struct ExecutionRecord {
    states: HashMap<TaskId, ExecState>,
    // Current DFS path, used to name the cycle when one is detected
    path: Vec<TaskId>,
}

/// High-level task runner that executes a target task and all of its
/// prerequisites, each at most once, in dependency order.
///
/// Execution is strictly sequential, so the execution record needs no
/// locking. If independent subgraphs were ever run concurrently, the
/// not-started -> in-progress -> completed transitions would have to become
/// atomic per task to keep the at-most-once guarantee; that is an extension
/// point, not part of the current contract.
pub struct TaskRunner<'a> {
    registry: &'a TaskRegistry,
}

impl<'a> TaskRunner<'a> {
    pub fn new(registry: &'a TaskRegistry) -> Self {
        Self { registry }
    }

    /// Run the target task and the full transitive closure of its
    /// dependencies.
    ///
    /// Each reachable task's body is invoked exactly once, and never before
    /// all of its direct dependencies have completed successfully. The first
    /// failure anywhere in the closure aborts the rest of the invocation.
    pub fn run(&self, target: &TaskId) -> ChoreResult<()> {
        let mut record = ExecutionRecord::default();
        self.run_task(target, &mut record)
    }

    fn run_task(&self, id: &TaskId, record: &mut ExecutionRecord) -> ChoreResult<()> {
        let task = self.registry.lookup(id)?;

        match record.states.get(id) {
            // Already ran in this invocation; shared dependencies (e.g. two
            // test steps both depending on "clean") hit this path.
            Some(ExecState::Completed) => return Ok(()),
            Some(ExecState::InProgress) => {
                return Err(ChoreError::CyclicDependency(Self::name_cycle(
                    &record.path,
                    id,
                )));
            }
            None => {}
        }

        record.states.insert(id.clone(), ExecState::InProgress);
        record.path.push(id.clone());

        // Dependencies run in declared order. The first failure propagates
        // immediately and this task's body is never invoked.
        for dependency in &task.dependencies {
            self.run_task(dependency, record)?;
        }

        self.print_run_header(id, &task.dependencies);

        if let Err(source) = task.execute() {
            // Leave the task "not started" so a fresh invocation may retry it
            record.states.remove(id);
            return Err(ChoreError::TaskExecution {
                task: id.clone(),
                source,
            });
        }

        record.states.insert(id.clone(), ExecState::Completed);
        record.path.pop();

        println!(
            "{} {}",
            "✓".green().bold(),
            format!("Completed {}", id).color(get_task_color(&id.name))
        );

        Ok(())
    }

    /// Extract the offending cycle from the current DFS path, ending back at
    /// the repeated task so the report reads "a -> b -> a".
    fn name_cycle(path: &[TaskId], repeated: &TaskId) -> Vec<TaskId> {
        let start = path.iter().position(|id| id == repeated).unwrap_or(0);
        let mut cycle: Vec<TaskId> = path[start..].to_vec();
        cycle.push(repeated.clone());
        cycle
    }

    fn print_run_header(&self, id: &TaskId, dependencies: &[TaskId]) {
        let task_color = get_task_color(&id.name);
        let after = if dependencies.is_empty() {
            "no prerequisites".to_string()
        } else {
            dependencies
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!();
        println!(
            "┌─ {}",
            format!("Running task '{}'", id).color(task_color).bold()
        );
        println!("└─ {} {}", "After:".bright_black(), after.bright_black());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::registry::TaskRegistry;
    use crate::types::ChoreError;

    type Trace = Rc<RefCell<Vec<String>>>;

    /// Body that appends the task's name to a shared trace
    fn recording(trace: &Trace, name: &'static str) -> impl Fn() -> anyhow::Result<()> {
        let trace = Rc::clone(trace);
        move || {
            trace.borrow_mut().push(name.to_string());
            Ok(())
        }
    }

    /// Body that records the attempt, then fails
    fn failing(trace: &Trace, name: &'static str) -> impl Fn() -> anyhow::Result<()> {
        let trace = Rc::clone(trace);
        move || {
            trace.borrow_mut().push(name.to_string());
            anyhow::bail!("{} exploded", name)
        }
    }

    fn register(
        registry: &mut TaskRegistry,
        name: &'static str,
        deps: &[&str],
        body: impl Fn() -> anyhow::Result<()> + 'static,
    ) {
        registry
            .register(
                TaskId::parse(name),
                name,
                deps.iter().map(|d| TaskId::parse(d)).collect(),
                body,
            )
            .unwrap();
    }

    #[test]
    fn test_diamond_dependency_runs_shared_task_once() {
        // a -> {b, c}, b -> {d}, c -> {d}
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "d", &[], recording(&trace, "d"));
        register(&mut registry, "b", &["d"], recording(&trace, "b"));
        register(&mut registry, "c", &["d"], recording(&trace, "c"));
        register(&mut registry, "a", &["b", "c"], recording(&trace, "a"));

        TaskRunner::new(&registry).run(&TaskId::new("a")).unwrap();

        let ran = trace.borrow();
        assert_eq!(
            ran.iter().filter(|n| *n == "d").count(),
            1,
            "Shared dependency must run exactly once, ran: {:?}",
            *ran
        );
        assert_eq!(*ran, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_dependencies_complete_before_dependent_starts() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "clean", &[], recording(&trace, "clean"));
        register(&mut registry, "build", &["clean"], recording(&trace, "build"));
        register(
            &mut registry,
            "install",
            &["build"],
            recording(&trace, "install"),
        );

        TaskRunner::new(&registry)
            .run(&TaskId::new("install"))
            .unwrap();

        assert_eq!(*trace.borrow(), vec!["clean", "build", "install"]);
    }

    #[test]
    fn test_failed_dependency_skips_dependent_body() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "b", &[], failing(&trace, "b"));
        register(&mut registry, "a", &["b"], recording(&trace, "a"));

        let err = TaskRunner::new(&registry)
            .run(&TaskId::new("a"))
            .expect_err("Failure in a dependency must abort the invocation");

        match err {
            ChoreError::TaskExecution { task, .. } => {
                assert_eq!(task, TaskId::new("b"), "Failure should name task 'b'")
            }
            other => panic!("Expected TaskExecution, got: {other}"),
        }
        assert_eq!(
            *trace.borrow(),
            vec!["b"],
            "Dependent task body must never be invoked"
        );
    }

    #[test]
    fn test_sibling_after_failure_does_not_run() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "b", &[], failing(&trace, "b"));
        register(&mut registry, "c", &[], recording(&trace, "c"));
        register(&mut registry, "a", &["b", "c"], recording(&trace, "a"));

        assert!(TaskRunner::new(&registry).run(&TaskId::new("a")).is_err());
        assert_eq!(
            *trace.borrow(),
            vec!["b"],
            "No dependency past the first failure may execute"
        );
    }

    #[test]
    fn test_two_node_cycle_is_reported() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "a", &["b"], recording(&trace, "a"));
        register(&mut registry, "b", &["a"], recording(&trace, "b"));

        let err = TaskRunner::new(&registry)
            .run(&TaskId::new("a"))
            .expect_err("Cycle must be detected, not looped");

        match err {
            ChoreError::CyclicDependency(cycle) => {
                let rendered: Vec<_> = cycle.iter().map(ToString::to_string).collect();
                assert_eq!(rendered, vec!["a", "b", "a"]);
            }
            other => panic!("Expected CyclicDependency, got: {other}"),
        }
        assert!(
            trace.borrow().is_empty(),
            "No body may run once a cycle is hit"
        );
    }

    #[test]
    fn test_self_cycle_is_reported() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "a", &["a"], recording(&trace, "a"));

        let err = TaskRunner::new(&registry)
            .run(&TaskId::new("a"))
            .expect_err("Self-dependency is a cycle");
        assert!(matches!(err, ChoreError::CyclicDependency(_)));
    }

    #[test]
    fn test_unknown_target_runs_nothing() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "build", &[], recording(&trace, "build"));

        let err = TaskRunner::new(&registry)
            .run(&TaskId::new("deploy"))
            .expect_err("Unregistered target must fail");
        assert!(matches!(err, ChoreError::UnknownTask(_)));
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn test_unknown_dependency_fails_before_dependent_body() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "a", &["missing"], recording(&trace, "a"));

        let err = TaskRunner::new(&registry)
            .run(&TaskId::new("a"))
            .expect_err("Unregistered dependency must fail");
        assert!(
            matches!(err, ChoreError::UnknownTask(ref id) if *id == TaskId::new("missing"))
        );
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn test_fresh_invocation_may_retry_failed_task() {
        // Body fails on the first attempt only
        let attempts = Rc::new(RefCell::new(0u32));
        let body = {
            let attempts = Rc::clone(&attempts);
            move || {
                *attempts.borrow_mut() += 1;
                if *attempts.borrow() == 1 {
                    anyhow::bail!("transient failure")
                }
                Ok(())
            }
        };

        let mut registry = TaskRegistry::new();
        registry
            .register(TaskId::new("flaky"), "flaky", Vec::new(), body)
            .unwrap();

        let runner = TaskRunner::new(&registry);
        assert!(runner.run(&TaskId::new("flaky")).is_err());
        runner
            .run(&TaskId::new("flaky"))
            .expect("A new invocation starts with a fresh execution record");
        assert_eq!(*attempts.borrow(), 2);
    }

    #[test]
    fn test_memoization_is_per_invocation() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "clean", &[], recording(&trace, "clean"));

        let runner = TaskRunner::new(&registry);
        runner.run(&TaskId::new("clean")).unwrap();
        runner.run(&TaskId::new("clean")).unwrap();

        assert_eq!(
            *trace.borrow(),
            vec!["clean", "clean"],
            "Memoization must not leak across invocations"
        );
    }

    #[test]
    fn test_namespaced_tasks_execute_independently() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        register(&mut registry, "install", &[], recording(&trace, "install"));
        register(
            &mut registry,
            "linter:install",
            &[],
            recording(&trace, "linter:install"),
        );
        register(
            &mut registry,
            "linter:lint",
            &["linter:install"],
            recording(&trace, "linter:lint"),
        );

        TaskRunner::new(&registry)
            .run(&TaskId::namespaced("linter", "lint"))
            .unwrap();

        assert_eq!(
            *trace.borrow(),
            vec!["linter:install", "linter:lint"],
            "Top-level 'install' must not be pulled in by its namespaced twin"
        );
    }
}
