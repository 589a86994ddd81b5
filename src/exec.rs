//! Blocking child-process creation with an explicit argv and environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use which::which;

use crate::errors::LaunchError;

#[derive(Debug, Default, Clone)]
pub struct ExecRequest {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(OsString, OsString)>,
    search_path: bool,
    verbatim_args: bool,
}

impl ExecRequest {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Replace the child environment with these ordered pairs.
    pub fn envs<I>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        self.env = env.into_iter().collect();
        self
    }

    /// Resolve a bare program name through PATH before spawning.
    pub fn search_path(mut self, search: bool) -> Self {
        self.search_path = search;
        self
    }

    /// Arguments are already quoted for a joined command line; on Windows
    /// they are appended raw instead of being escaped a second time.
    pub fn verbatim_args(mut self, verbatim: bool) -> Self {
        self.verbatim_args = verbatim;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn get_env(&self) -> &[(OsString, OsString)] {
        &self.env
    }

    /// One-line rendering for logs; words a POSIX shell would split are single-quoted.
    pub fn preview(&self) -> String {
        let program = self.program.as_os_str().to_string_lossy();
        std::iter::once(program)
            .chain(self.args.iter().map(|a| a.to_string_lossy()))
            .map(|w| preview_word(&w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn resolve_program(&self) -> Result<PathBuf, LaunchError> {
        if !self.search_path {
            return Ok(self.program.clone());
        }
        which(&self.program).map_err(|e| LaunchError::Spawn {
            program: self.program.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
        })
    }

    fn command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        self.push_args(&mut cmd);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.env_clear();
        // Later duplicates override earlier ones.
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    #[cfg(windows)]
    fn push_args(&self, cmd: &mut Command) {
        use std::os::windows::process::CommandExt;
        for arg in &self.args {
            if self.verbatim_args {
                cmd.raw_arg(arg);
            } else {
                cmd.arg(arg);
            }
        }
    }

    #[cfg(not(windows))]
    fn push_args(&self, cmd: &mut Command) {
        cmd.args(&self.args);
    }
}

fn preview_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_=./:@\\;,+%".contains(&b));
    if plain {
        return word.to_string();
    }
    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');
    for c in word.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// Spawn the child with inherited stdio and block until it exits.
///
/// `Err` means the child never ran; a child that ran and failed is `Ok`
/// with a non-success status.
pub fn spawn_and_wait(request: &ExecRequest) -> Result<ExitStatus, LaunchError> {
    let program = request.resolve_program()?;
    tracing::debug!(program = %program.display(), cmd = %request.preview(), "spawning");

    let spawn_err = |source: std::io::Error| LaunchError::Spawn {
        program: program.display().to_string(),
        source,
    };
    let mut child = request.command(&program).spawn().map_err(spawn_err)?;
    let status = child.wait().map_err(spawn_err)?;

    tracing::debug!(?status, "child exited");
    Ok(status)
}
