//! Platform detection utilities for cross-platform executable naming

use std::env;

/// Information about the current platform for naming build artifacts
#[derive(Debug, Clone)]
pub struct PlatformInfo {
    /// Operating system name as reported by the toolchain (e.g. "linux")
    pub os: &'static str,
    /// Executable file suffix (".exe" on Windows, empty elsewhere)
    pub exe_suffix: &'static str,
}

impl PlatformInfo {
    /// Detect the current platform
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Create platform info from an OS string
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self {
                os: "windows",
                exe_suffix: ".exe",
            },
            "macos" => Self {
                os: "macos",
                exe_suffix: "",
            },
            _ => Self {
                os: "linux",
                exe_suffix: "",
            },
        }
    }

    /// Append the platform's executable suffix to a program name
    pub fn executable_name(&self, name: &str) -> String {
        format!("{}{}", name, self.exe_suffix)
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }
}
