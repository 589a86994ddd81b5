#![allow(clippy::module_name_repetitions)]
//! Host profile and resolution of the launcher's own on-disk image.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use which::which;

/// Host-dependent constants used while assembling the child invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub is_windows: bool,
    /// Suffix the self-image name must carry; empty when none is required.
    pub exe_suffix: &'static str,
    pub classpath_separator: char,
    pub runtime_command: &'static str,
    /// Runtime binary relative to the runtime home directory.
    pub runtime_binary: &'static str,
    /// The process-creation primitive joins argv into a single command line,
    /// so forwarded arguments must be quoted by the launcher.
    pub joins_command_line: bool,
}

impl Platform {
    pub const WINDOWS: Platform = Platform {
        is_windows: true,
        exe_suffix: ".exe",
        classpath_separator: ';',
        runtime_command: "java.exe",
        runtime_binary: "bin/java.exe",
        joins_command_line: true,
    };

    pub const UNIX: Platform = Platform {
        is_windows: false,
        exe_suffix: "",
        classpath_separator: ':',
        runtime_command: "java",
        runtime_binary: "bin/java",
        joins_command_line: false,
    };

    pub fn host() -> Platform {
        if cfg!(windows) {
            Platform::WINDOWS
        } else {
            Platform::UNIX
        }
    }
}

/// The launcher's own executable file, as scanned and as reported to the child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfImage {
    path: PathBuf,
}

impl SelfImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve from argv[0]:
    /// - append the platform suffix when missing
    /// - keep that name when it exists on disk
    /// - a bare name is looked up on PATH
    /// - otherwise fall back to the running executable
    pub fn resolve(argv0: Option<&OsStr>, platform: &Platform) -> Self {
        let canonical = canonical_name(argv0.unwrap_or_default(), platform);
        if canonical.is_file() {
            tracing::debug!(path = %canonical.display(), "self-image from argv[0]");
            return Self::new(canonical);
        }

        let bare = canonical
            .parent()
            .map(|p| p.as_os_str().is_empty())
            .unwrap_or(true);
        if bare && !canonical.as_os_str().is_empty() {
            if let Ok(found) = which(&canonical) {
                tracing::debug!(path = %found.display(), "self-image from PATH");
                return Self::new(canonical_name(found.as_os_str(), platform));
            }
        }

        match env::current_exe() {
            Ok(exe) => {
                tracing::debug!(path = %exe.display(), "self-image from current_exe");
                Self::new(canonical_name(exe.as_os_str(), platform))
            }
            Err(e) => {
                tracing::debug!(error = %e, "current_exe unavailable; keeping argv[0]");
                Self::new(canonical)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_os_str(&self) -> &OsStr {
        self.path.as_os_str()
    }
}

/// Append the required suffix unless the name already ends with it (ASCII case-insensitive).
pub fn canonical_name(name: &OsStr, platform: &Platform) -> PathBuf {
    let suffix = platform.exe_suffix;
    if suffix.is_empty() || has_suffix_ignore_case(name, suffix) {
        return PathBuf::from(name);
    }
    let mut out = OsString::from(name);
    out.push(suffix);
    PathBuf::from(out)
}

fn has_suffix_ignore_case(name: &OsStr, suffix: &str) -> bool {
    let s = name.to_string_lossy();
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
