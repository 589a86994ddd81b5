//! Launcher configuration, read from the process environment.
//!
//! The launcher has no flags of its own; every argument belongs to the child.

use std::env;

/// Fully qualified name of the class that reflectively runs an archive's
/// manifest main-class when a user classpath is present.
pub const DEFAULT_MAIN_CLASS: &str = "edu.uidaho.junicon.runtime.util.JarRunner";

pub const ENV_RUNTIME_HOME: &str = "JAVA_HOME";
pub const ENV_CLASSPATH: &str = "CLASSPATH";
pub const ENV_MAIN_CLASS: &str = "LAUNCHER_MAIN_CLASS";
pub const ENV_LOG: &str = "LAUNCHER_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Pins the runtime binary to `<home>/bin/java[.exe]`.
    pub runtime_home: Option<String>,
    /// Switches to reflective invocation with this classpath prepended.
    pub classpath: Option<String>,
    pub main_class: String,
    pub log_filter: Option<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            runtime_home: None,
            classpath: None,
            main_class: DEFAULT_MAIN_CLASS.to_string(),
            log_filter: None,
        }
    }
}

impl LauncherConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            runtime_home: get(ENV_RUNTIME_HOME),
            classpath: get(ENV_CLASSPATH),
            main_class: get(ENV_MAIN_CLASS)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_MAIN_CLASS.to_string()),
            log_filter: get(ENV_LOG),
        }
    }
}
