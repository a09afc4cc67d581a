//! Chore Core Library
//!
//! This is the core library for the Chore build tool. It provides the task
//! registry and the dependency-resolving runner that executes a requested
//! build step together with all of its prerequisites.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`registry`] - Task identities, bodies, and the registry they live in
//! - [`execution`] - Task execution engine with dependency resolution
//! - [`platform`] - Cross-platform executable naming helpers
//! - [`tasks`] - Task label color management
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! Build a [`TaskRegistry`], register steps with their dependencies, and hand
//! it to a [`TaskRunner`]:
//!
//! ```rust
//! use chore_core::registry::{TaskId, TaskRegistry};
//! use chore_core::execution::TaskRunner;
//!
//! fn clean() -> anyhow::Result<()> {
//!     Ok(())
//! }
//!
//! fn build() -> anyhow::Result<()> {
//!     Ok(())
//! }
//!
//! # fn example() -> chore_core::types::ChoreResult<()> {
//! let mut registry = TaskRegistry::new();
//! registry.register(TaskId::new("clean"), "Remove outputs", Vec::new(), clean)?;
//! registry.register(
//!     TaskId::new("build"),
//!     "Build the project",
//!     vec![TaskId::new("clean")],
//!     build,
//! )?;
//!
//! TaskRunner::new(&registry).run(&TaskId::new("build"))?;
//! # Ok(())
//! # }
//! ```

pub mod execution;
pub mod platform;
pub mod registry;
pub mod tasks;
pub mod types;

// Re-export the main types for easier usage
pub use execution::TaskRunner;
pub use registry::{Task, TaskBody, TaskId, TaskRegistry};
pub use types::{ChoreError, ChoreResult};
