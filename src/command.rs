#![allow(clippy::module_name_repetitions)]
//! Command assembly: the one-line cmd script and the runtime argument vector.

use std::ffi::{OsStr, OsString};

use crate::runtime::InvocationMode;
use crate::self_image::{Platform, SelfImage};

/// Captures the forwarded arguments in `%args%` with delayed expansion enabled.
pub const SHELL_PREFIX: &str = "(setlocal enabledelayedexpansion) & (set args=";
/// Closes the `set args=` group and opens the first payload group.
pub const SHELL_SEPARATOR: &str = ") & (";

/// Argument used by the reflective entry point to pick the manifest main-class.
pub const MANIFEST_ARG: &str = "manifest";

fn has_whitespace(arg: &OsStr) -> bool {
    arg.to_string_lossy().chars().any(char::is_whitespace)
}

/// Wrap in double quotes when the argument contains whitespace.
pub fn quote_arg(arg: &OsStr) -> OsString {
    if !has_whitespace(arg) {
        return arg.to_os_string();
    }
    let mut out = OsString::with_capacity(arg.len() + 2);
    out.push("\"");
    out.push(arg);
    out.push("\"");
    out
}

/// Quote for a Windows command line parsed by the C runtime: wrap when the
/// argument has whitespace or a `"`, escape embedded quotes as `\"`, and
/// double any backslashes that precede a quote or the closing quote.
/// Other backslashes stay literal.
pub fn quote_windows_arg(arg: &OsStr) -> OsString {
    let s = arg.to_string_lossy();
    if !has_whitespace(arg) && !s.contains('"') {
        return arg.to_os_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut backslashes = 0usize;
    for c in s.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                out.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                out.push('"');
                backslashes = 0;
            }
            _ => {
                out.extend(std::iter::repeat('\\').take(backslashes));
                out.push(c);
                backslashes = 0;
            }
        }
    }
    out.extend(std::iter::repeat('\\').take(backslashes * 2));
    out.push('"');
    out.into()
}

/// Quote each argument and join with single spaces.
pub fn join_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| quote_arg(a).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the single-line script handed to `cmd /c`.
///
/// Every CR and LF becomes a space; the payload lines are expected to be
/// joined with `) & (` already.
pub fn assemble_shell_command(args: &[OsString], payload: &[u8]) -> String {
    let joined = join_args(args);
    let text = String::from_utf8_lossy(payload);
    let mut cmd =
        String::with_capacity(SHELL_PREFIX.len() + joined.len() + SHELL_SEPARATOR.len() + text.len());
    cmd.push_str(SHELL_PREFIX);
    cmd.push_str(&joined);
    cmd.push_str(SHELL_SEPARATOR);
    cmd.push_str(&text);
    cmd.replace(|c| c == '\r' || c == '\n', " ")
}

/// Arguments that follow the runtime executable:
/// - `-jar <self>` when running the archive directly
/// - `-cp <classpath><sep><self> <main-class> <self> manifest` in reflective mode
///
/// then the caller's arguments. Where the platform joins argv into one
/// command line, every entry is quoted with `quote_windows_arg`.
pub fn assemble_runtime_args(
    mode: &InvocationMode,
    self_image: &SelfImage,
    args: &[OsString],
    platform: &Platform,
) -> Vec<OsString> {
    let mut out: Vec<OsString> = Vec::with_capacity(args.len() + 5);
    match mode {
        InvocationMode::Archive => {
            out.push("-jar".into());
            out.push(self_image.as_os_str().to_os_string());
        }
        InvocationMode::Reflective {
            classpath,
            main_class,
        } => {
            let mut cp = OsString::from(classpath);
            cp.push(platform.classpath_separator.to_string());
            cp.push(self_image.as_os_str());
            out.push("-cp".into());
            out.push(cp);
            out.push(main_class.into());
            out.push(self_image.as_os_str().to_os_string());
            out.push(MANIFEST_ARG.into());
        }
    }
    out.extend(args.iter().cloned());

    if platform.joins_command_line {
        out.iter().map(|a| quote_windows_arg(a)).collect()
    } else {
        out
    }
}
