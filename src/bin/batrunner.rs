//! Run the cmd script appended to this executable.
//!
//! Layout of a packaged file: `[batrunner][script][jar]`. The script is the
//! text between `#!/batrunner begin` and `#!/batrunner end`, written as
//! groups joined by `) & (`; `%args%` holds this launcher's arguments.

use std::env;
use std::ffi::OsString;
use std::process::{ExitCode, ExitStatus};

use batrunner::{exit_code_for_status, init_logging, run_shell, LaunchError, LauncherConfig, Platform};

fn run() -> anyhow::Result<ExitStatus> {
    let argv: Vec<OsString> = env::args_os().collect();
    Ok(run_shell(&argv, env::vars_os(), &Platform::host())?)
}

fn main() -> ExitCode {
    let config = LauncherConfig::from_env();
    init_logging(config.log_filter.as_deref());

    match run() {
        Ok(status) => ExitCode::from(exit_code_for_status(&status)),
        Err(e) => {
            tracing::debug!(error = ?e, "batrunner failed");
            eprintln!("{e}");
            ExitCode::from(
                e.downcast_ref::<LaunchError>()
                    .map(LaunchError::exit_code)
                    .unwrap_or(1),
            )
        }
    }
}
