//! Process invocation helpers for task bodies
//!
//! Thin wrappers around `std::process::Command` with consistent error
//! messages, so step definitions stay one-liners.

use std::process::Command;

use anyhow::{bail, Context, Result};

/// Run a program with arguments, inheriting stdio. Fails if the program
/// cannot be spawned or exits non-zero.
pub fn run(program: &str, args: &[&str]) -> Result<()> {
    run_with_env(program, args, &[])
}

/// Like [`run`], with extra environment variables set for the child
pub fn run_with_env(program: &str, args: &[&str], env: &[(&str, String)]) -> Result<()> {
    let mut command = Command::new(program);
    command.args(args);
    for (key, value) in env {
        command.env(key, value);
    }

    let status = command
        .status()
        .with_context(|| format!("Failed to execute command '{}'", program))?;

    if !status.success() {
        bail!(
            "Command '{}' failed with exit code: {}",
            program,
            status.code().unwrap_or(-1)
        );
    }

    Ok(())
}

/// Run a program and capture its trimmed stdout. Fails if the program cannot
/// be spawned or exits non-zero.
pub fn output(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute command '{}'", program))?;

    if !output.status.success() {
        bail!(
            "Command '{}' failed with exit code: {}",
            program,
            output.status.code().unwrap_or(-1)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
