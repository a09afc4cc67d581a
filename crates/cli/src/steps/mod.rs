//! Bundled build-step definitions
//!
//! This is the build-definition layer: it registers every step the `chore`
//! binary knows about, with its dependencies and its body. The core runner
//! never interprets what a body does; everything in this module is glue
//! around compilers, git, and the filesystem.

pub mod buildmeta;
pub mod fsops;
pub mod paths;
pub mod sh;

use std::path::Path;

use anyhow::bail;
use chore_core::platform::PlatformInfo;
use chore_core::registry::{TaskId, TaskRegistry};
use chore_core::types::ChoreResult;

/// Directory build outputs land in, relative to the project root
const OUTPUT_DIR: &str = "bin";
/// Name of the binary the build step produces
const BINARY: &str = "chore";

/// Build the registry of bundled steps. `build` is the default task.
pub fn registry() -> ChoreResult<TaskRegistry> {
    let mut registry = TaskRegistry::new();

    registry.register(
        TaskId::new("clean"),
        "Remove output and intermediate files",
        Vec::new(),
        clean,
    )?;
    registry.register(
        TaskId::new("build"),
        "Build the project locally",
        vec![TaskId::new("clean")],
        build,
    )?;
    registry.register(
        TaskId::new("install"),
        "Build and install the binary with the current source code",
        vec![TaskId::new("build")],
        install,
    )?;

    registry.register(
        TaskId::namespaced("linter", "install"),
        "Download and install the linter",
        Vec::new(),
        linter_install,
    )?;
    registry.register(
        TaskId::namespaced("linter", "lint"),
        "Run the linter",
        vec![TaskId::namespaced("linter", "install")],
        lint,
    )?;

    registry.register(
        TaskId::namespaced("test", "unit"),
        "Run the unit tests",
        Vec::new(),
        test_unit,
    )?;
    registry.register(
        TaskId::namespaced("test", "coverage"),
        "Run unit tests creating the output to report coverage",
        Vec::new(),
        test_coverage,
    )?;
    registry.register(
        TaskId::namespaced("test", "integration"),
        "Run the integration tests",
        Vec::new(),
        test_integration,
    )?;
    registry.register(
        TaskId::namespaced("test", "e2e"),
        "Run the end-to-end tests (used in the CI)",
        Vec::new(),
        test_e2e,
    )?;

    registry.set_default(TaskId::new("build"))?;

    Ok(registry)
}

fn clean() -> anyhow::Result<()> {
    println!("Cleaning...");
    fsops::remove_dir(Path::new(OUTPUT_DIR))
}

fn build() -> anyhow::Result<()> {
    println!("Building...");
    let meta = buildmeta::collect();
    sh::run_with_env(
        "cargo",
        &["build", "--release", "--bin", BINARY],
        &meta.env(),
    )?;

    // Stage the binary under bin/ so install has a stable source path
    let name = PlatformInfo::current().executable_name(BINARY);
    fsops::copy_file(
        &Path::new("target").join("release").join(&name),
        &Path::new(OUTPUT_DIR).join(&name),
    )
}

fn install() -> anyhow::Result<()> {
    println!("Installing...");
    let name = PlatformInfo::current().executable_name(BINARY);
    let src = Path::new(OUTPUT_DIR).join(&name);
    let dst = paths::install_bin_dir()?.join(&name);
    fsops::copy_file(&src, &dst)
}

fn linter_install() -> anyhow::Result<()> {
    println!("Installing clippy...");
    sh::run("rustup", &["component", "add", "clippy"])
}

fn lint() -> anyhow::Result<()> {
    println!("Linting using clippy...");
    sh::run(
        "cargo",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test_unit() -> anyhow::Result<()> {
    sh::run("cargo", &["test", "--workspace"])
}

fn test_coverage() -> anyhow::Result<()> {
    // Stale profiling output skews the report
    fsops::remove_glob(Path::new("."), "*.profraw")?;
    sh::run(
        "cargo",
        &[
            "llvm-cov",
            "--workspace",
            "--lcov",
            "--output-path",
            "coverage-all.lcov",
        ],
    )
}

fn test_integration() -> anyhow::Result<()> {
    if PlatformInfo::current().is_windows() {
        bail!("integration tests are not available on windows yet");
    }
    sh::run("./test/integration.sh", &[])
}

fn test_e2e() -> anyhow::Result<()> {
    if PlatformInfo::current().is_windows() {
        bail!("end to end tests are not available on windows yet");
    }
    sh::run("./test/e2e/ci.sh", &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_bundled_steps_register() {
        let registry = registry().unwrap();
        for target in [
            "clean",
            "build",
            "install",
            "linter:install",
            "linter:lint",
            "test:unit",
            "test:coverage",
            "test:integration",
            "test:e2e",
        ] {
            assert!(
                registry.lookup(&TaskId::parse(target)).is_ok(),
                "Step '{target}' should be registered"
            );
        }
    }

    #[test]
    fn test_build_is_the_default() {
        let registry = registry().unwrap();
        assert_eq!(registry.default_task(), Some(&TaskId::new("build")));
    }

    #[test]
    fn test_declared_dependencies() {
        let registry = registry().unwrap();

        let build = registry.lookup(&TaskId::new("build")).unwrap();
        assert_eq!(build.dependencies, vec![TaskId::new("clean")]);

        let install = registry.lookup(&TaskId::new("install")).unwrap();
        assert_eq!(install.dependencies, vec![TaskId::new("build")]);

        let lint = registry
            .lookup(&TaskId::namespaced("linter", "lint"))
            .unwrap();
        assert_eq!(
            lint.dependencies,
            vec![TaskId::namespaced("linter", "install")]
        );
    }

    #[test]
    fn test_namespaced_install_is_distinct_from_top_level() {
        let registry = registry().unwrap();
        let top = registry.lookup(&TaskId::new("install")).unwrap();
        let linter = registry
            .lookup(&TaskId::namespaced("linter", "install"))
            .unwrap();
        assert_ne!(top.id, linter.id);
        assert_ne!(top.dependencies, linter.dependencies);
    }
}
