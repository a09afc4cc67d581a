//! Install path resolution for the install step

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Result};

/// Resolve the directory the install step copies the binary into.
///
/// Precedence: `CHORE_INSTALL_DIR`, then `$CARGO_HOME/bin`, then
/// `$HOME/.cargo/bin`. With none of those set there is no sensible
/// destination, so resolution fails.
pub fn install_bin_dir() -> Result<PathBuf> {
    install_bin_dir_from(|key| env::var_os(key))
}

fn install_bin_dir_from(get: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = get("CHORE_INSTALL_DIR") {
        return Ok(PathBuf::from(dir));
    }

    if let Some(cargo_home) = get("CARGO_HOME") {
        return Ok(PathBuf::from(cargo_home).join("bin"));
    }

    if let Some(home) = get("HOME") {
        return Ok(PathBuf::from(home).join(".cargo").join("bin"));
    }

    bail!("CHORE_INSTALL_DIR, CARGO_HOME or HOME environment variables should be set")
}
