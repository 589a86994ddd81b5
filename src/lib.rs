//! Self-extracting launcher: a small executable with a cmd script or a Java
//! archive appended to its own binary.
//!
//! A packaged file is both an executable (read from the front) and a zip/jar
//! (read from the end). At startup the launcher finds its own image, pulls
//! the embedded command block out of it, and runs the child with the
//! caller's arguments.
//!
//! Key modules
//! - scanner: bounded sliding-window search for the sentinel markers.
//! - command: the one-line cmd script and the runtime argument vector.
//! - env: child environment with `LAUNCHER_ARG0` / `LAUNCHER_ISWINDOWS`.
//! - runtime: `JAVA_HOME` / `CLASSPATH` driven runtime selection.
//! - exec: blocking spawn with explicit argv and environment.
//!
//! Environment invariants
//! - LAUNCHER_ARG0: resolved self-image path (suffix appended when required).
//! - LAUNCHER_ISWINDOWS: `true` for the cmd launcher and on Windows hosts.
//! - LAUNCHER_LOG: tracing filter for stderr diagnostics (default `warn`).

pub mod command;
pub mod config;
pub mod env;
pub mod errors;
pub mod exec;
pub mod launcher;
pub mod logging;
pub mod runtime;
pub mod scanner;
pub mod self_image;

pub use command::{
    assemble_runtime_args, assemble_shell_command, join_args, quote_arg, quote_windows_arg,
};
pub use config::LauncherConfig;
pub use env::{env_strings, propagate_environment, EnvironmentVector};
pub use errors::{exit_code_for_code, exit_code_for_io_error, exit_code_for_status, LaunchError};
pub use exec::{spawn_and_wait, ExecRequest};
pub use launcher::{prepare_runtime, prepare_shell, run_runtime, run_shell};
pub use logging::init_logging;
pub use runtime::{invocation_mode, resolve_runtime, InvocationMode, RuntimeLocation};
pub use scanner::{extract_payload, extract_payload_from_file, PayloadScanner, BEGIN_MARKER, END_MARKER};
pub use self_image::{canonical_name, Platform, SelfImage};
