#![allow(clippy::module_name_repetitions)]
//! Runtime discovery and invocation mode for the archive launcher.

use std::path::PathBuf;

use crate::config::LauncherConfig;
use crate::self_image::Platform;

/// Where the runtime executable comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeLocation {
    /// Exact path under the runtime home; no search-path lookup.
    Pinned(PathBuf),
    /// Bare name resolved through PATH at spawn time.
    Search(String),
}

impl RuntimeLocation {
    pub fn program(&self) -> PathBuf {
        match self {
            RuntimeLocation::Pinned(p) => p.clone(),
            RuntimeLocation::Search(name) => PathBuf::from(name),
        }
    }

    pub fn uses_search_path(&self) -> bool {
        matches!(self, RuntimeLocation::Search(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationMode {
    /// `java -jar <self>`
    Archive,
    /// `java -cp <classpath><sep><self> <main-class> <self> manifest`; needed
    /// because `-jar` ignores any user classpath.
    Reflective { classpath: String, main_class: String },
}

/// Join the runtime home with the relative binary path, adding a `/` only
/// when the home does not already end in a separator.
pub fn resolve_runtime(config: &LauncherConfig, platform: &Platform) -> RuntimeLocation {
    match config.runtime_home.as_deref() {
        Some(home) => {
            let mut path = String::with_capacity(home.len() + platform.runtime_binary.len() + 1);
            path.push_str(home);
            if !(home.ends_with('/') || home.ends_with('\\')) {
                path.push('/');
            }
            path.push_str(platform.runtime_binary);
            RuntimeLocation::Pinned(PathBuf::from(path))
        }
        None => RuntimeLocation::Search(platform.runtime_command.to_string()),
    }
}

pub fn invocation_mode(config: &LauncherConfig) -> InvocationMode {
    match config.classpath.as_deref() {
        Some(cp) => InvocationMode::Reflective {
            classpath: cp.to_string(),
            main_class: config.main_class.clone(),
        },
        None => InvocationMode::Archive,
    }
}
