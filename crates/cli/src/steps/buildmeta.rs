//! Build metadata stamped into the compiled binary
//!
//! Version and commit come from git; a checkout without tags just yields
//! empty fields, matching a plain source download.

use std::env;

use chrono::Utc;

use crate::steps::sh;

#[derive(Debug, Clone)]
pub struct BuildMeta {
    pub version: String,
    pub commit: String,
    pub build_date: String,
    pub os: &'static str,
    pub arch: &'static str,
}

/// Collect build metadata from git and the host toolchain
pub fn collect() -> BuildMeta {
    let version = sh::output("git", &["describe", "--tags", "--dirty", "--broken"])
        .unwrap_or_default();
    let commit = sh::output("git", &["rev-parse", "HEAD"]).unwrap_or_default();

    BuildMeta {
        version,
        commit,
        build_date: Utc::now().to_rfc3339(),
        os: env::consts::OS,
        arch: env::consts::ARCH,
    }
}

impl BuildMeta {
    /// Environment variables the build step passes to the compiler invocation
    pub fn env(&self) -> Vec<(&'static str, String)> {
        vec![
            ("CHORE_VERSION", self.version.clone()),
            ("CHORE_OS", self.os.to_string()),
            ("CHORE_ARCH", self.arch.to_string()),
            ("CHORE_COMMIT", self.commit.clone()),
            ("CHORE_BUILD_DATE", self.build_date.clone()),
        ]
    }
}
