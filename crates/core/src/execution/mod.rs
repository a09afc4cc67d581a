//! Task execution module
//!
//! This module handles the execution of a target task together with the
//! transitive closure of its dependencies.

pub mod runner;

pub use runner::TaskRunner;
