//! End-to-end flows for the two launcher binaries.
//!
//! `prepare_*` functions are pure and build the child request; `run_*`
//! resolve the self-image, spawn, and wait.

use std::ffi::OsString;
use std::process::ExitStatus;

use crate::command::{assemble_runtime_args, assemble_shell_command};
use crate::config::LauncherConfig;
use crate::env::propagate_environment;
use crate::errors::LaunchError;
use crate::exec::{spawn_and_wait, ExecRequest};
use crate::runtime::{invocation_mode, resolve_runtime};
use crate::scanner::extract_payload_from_file;
use crate::self_image::{Platform, SelfImage};

pub const SHELL_PROGRAM: &str = "cmd.exe";
/// Strip outer quotes, quiet, delayed expansion, run the string and exit.
pub const SHELL_FLAGS: [&str; 4] = ["/s", "/q", "/v:on", "/c"];

/// `cmd.exe /s /q /v:on /c "<prefix><args><separator><payload>"`.
pub fn prepare_shell<E>(
    self_image: &SelfImage,
    args: &[OsString],
    parent_env: E,
    payload: &[u8],
) -> ExecRequest
where
    E: IntoIterator<Item = (OsString, OsString)>,
{
    let command = assemble_shell_command(args, payload);
    ExecRequest::new(SHELL_PROGRAM)
        .args(SHELL_FLAGS)
        .arg(command)
        .envs(propagate_environment(parent_env, self_image, true))
        .search_path(true)
        .verbatim_args(true)
}

/// Run the runtime on the self-image, directly or through the reflective entry point.
pub fn prepare_runtime<E>(
    config: &LauncherConfig,
    platform: &Platform,
    self_image: &SelfImage,
    args: &[OsString],
    parent_env: E,
) -> ExecRequest
where
    E: IntoIterator<Item = (OsString, OsString)>,
{
    let location = resolve_runtime(config, platform);
    let mode = invocation_mode(config);
    tracing::debug!(?location, ?mode, "runtime invocation");

    ExecRequest::new(location.program())
        .args(assemble_runtime_args(&mode, self_image, args, platform))
        .envs(propagate_environment(
            parent_env,
            self_image,
            platform.is_windows,
        ))
        .search_path(location.uses_search_path())
        .verbatim_args(platform.joins_command_line)
}

fn split_argv(argv: &[OsString], platform: &Platform) -> (SelfImage, Vec<OsString>) {
    let self_image = SelfImage::resolve(argv.first().map(OsString::as_os_str), platform);
    tracing::debug!(path = %self_image.path().display(), "self-image");
    // argv[0] is never forwarded; the child gets it through LAUNCHER_ARG0.
    let args = argv.iter().skip(1).cloned().collect();
    (self_image, args)
}

/// Scan the self-image for the embedded script and run it through the shell.
pub fn run_shell<E>(
    argv: &[OsString],
    parent_env: E,
    platform: &Platform,
) -> Result<ExitStatus, LaunchError>
where
    E: IntoIterator<Item = (OsString, OsString)>,
{
    let (self_image, args) = split_argv(argv, platform);
    let payload = extract_payload_from_file(self_image.path())?;
    let request = prepare_shell(&self_image, &args, parent_env, &payload);
    spawn_and_wait(&request)
}

/// Run the archive appended to the self-image with the Java runtime.
pub fn run_runtime<E>(
    argv: &[OsString],
    parent_env: E,
    config: &LauncherConfig,
    platform: &Platform,
) -> Result<ExitStatus, LaunchError>
where
    E: IntoIterator<Item = (OsString, OsString)>,
{
    let (self_image, args) = split_argv(argv, platform);
    let request = prepare_runtime(config, platform, &self_image, &args, parent_env);
    spawn_and_wait(&request)
}
