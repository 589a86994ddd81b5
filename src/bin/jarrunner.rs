//! Run the Java archive appended to this executable.
//!
//! `JAVA_HOME` pins the runtime binary; otherwise `java` is found on PATH.
//! With `CLASSPATH` set, the archive is added to it and started through the
//! reflective entry point, since `java -jar` ignores the user classpath.

use std::env;
use std::ffi::OsString;
use std::process::{ExitCode, ExitStatus};

use batrunner::{
    exit_code_for_status, init_logging, run_runtime, LaunchError, LauncherConfig, Platform,
};

fn run(config: &LauncherConfig) -> anyhow::Result<ExitStatus> {
    let argv: Vec<OsString> = env::args_os().collect();
    Ok(run_runtime(&argv, env::vars_os(), config, &Platform::host())?)
}

fn main() -> ExitCode {
    let config = LauncherConfig::from_env();
    init_logging(config.log_filter.as_deref());

    match run(&config) {
        Ok(status) => ExitCode::from(exit_code_for_status(&status)),
        Err(e) => {
            tracing::debug!(error = ?e, "jarrunner failed");
            eprintln!("{e}");
            ExitCode::from(
                e.downcast_ref::<LaunchError>()
                    .map(LaunchError::exit_code)
                    .unwrap_or(1),
            )
        }
    }
}
