//! Task registry
//!
//! This module holds the static definition of all tasks: their identities,
//! declared dependencies, and executable bodies. The registry is populated
//! once at startup by the build-definition layer and is read-only while the
//! runner executes.

use std::collections::HashMap;
use std::fmt;

use crate::types::{ChoreError, ChoreResult};

/// Identity of a task: an optional namespace plus a name.
///
/// Namespaces group related steps (e.g. `test:unit`, `test:coverage`) without
/// changing execution semantics. Names are unique within a namespace, and
/// top-level tasks (no namespace) form their own namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId {
    pub namespace: Option<String>,
    pub name: String,
}

impl TaskId {
    /// Create a top-level task identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Create a namespaced task identity
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Parse a target in the format "namespace:name" or just "name"
    pub fn parse(target: &str) -> Self {
        match target.split_once(':') {
            Some((namespace, name)) => Self::namespaced(namespace, name),
            None => Self::new(target),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}:{}", namespace, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// An executable task body.
///
/// The runner treats bodies as opaque: a body may shell out to a compiler,
/// copy files, or run pure in-memory logic. Its only contract is "run once,
/// report success or a failure cause".
pub trait TaskBody {
    fn run(&self) -> anyhow::Result<()>;
}

impl<F> TaskBody for F
where
    F: Fn() -> anyhow::Result<()>,
{
    fn run(&self) -> anyhow::Result<()> {
        self()
    }
}

/// A registered task: identity, declared direct dependencies, and a body.
///
/// Tasks are immutable once registered.
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub dependencies: Vec<TaskId>,
    body: Box<dyn TaskBody>,
}

impl Task {
    /// Invoke the task's body
    pub fn execute(&self) -> anyhow::Result<()> {
        self.body.run()
    }
}

// Manual impl: the body is an opaque trait object with nothing to show
impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// The set of all registered tasks.
///
/// Constructed explicitly and passed to the runner by reference, so multiple
/// independent registries can coexist (no process-wide globals).
#[derive(Default)]
pub struct TaskRegistry {
    tasks: HashMap<TaskId, Task>,
    // Registration order, for stable listing
    order: Vec<TaskId>,
    default: Option<TaskId>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task under its identity.
    ///
    /// Fails with [`ChoreError::DuplicateTask`] if the identity is already
    /// taken; an existing task is never silently overwritten.
    pub fn register(
        &mut self,
        id: TaskId,
        description: impl Into<String>,
        dependencies: Vec<TaskId>,
        body: impl TaskBody + 'static,
    ) -> ChoreResult<()> {
        if self.tasks.contains_key(&id) {
            return Err(ChoreError::DuplicateTask(id));
        }

        self.order.push(id.clone());
        self.tasks.insert(
            id.clone(),
            Task {
                id,
                description: description.into(),
                dependencies,
                body: Box::new(body),
            },
        );
        Ok(())
    }

    /// Resolve an identity to its task
    pub fn lookup(&self, id: &TaskId) -> ChoreResult<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| ChoreError::UnknownTask(id.clone()))
    }

    /// Mark a registered task as the default target
    pub fn set_default(&mut self, id: TaskId) -> ChoreResult<()> {
        if !self.tasks.contains_key(&id) {
            return Err(ChoreError::UnknownTask(id));
        }
        self.default = Some(id);
        Ok(())
    }

    /// The default target, if one was set
    pub fn default_task(&self) -> Option<&TaskId> {
        self.default.as_ref()
    }

    /// Iterate over tasks in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
