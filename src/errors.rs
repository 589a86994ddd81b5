//! Error mapping guide:
//! - PayloadNotFound always exits with 1 (the payload was not attached correctly).
//! - Spawn failures map io::ErrorKind::NotFound to 127; all others to 1.
//! - A child that ran to completion hands its own status back through exit_code_for_status.
use std::fmt;
use std::io;
use std::process::ExitStatus;

/// Exit code used when a sentinel marker is missing from the self-image.
pub const EXIT_PAYLOAD_NOT_FOUND: u8 = 1;

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

#[derive(Debug)]
pub enum LaunchError {
    /// A sentinel marker was not located before end-of-stream.
    PayloadNotFound { marker: String },
    /// The target executable could not be resolved or started.
    Spawn { program: String, source: io::Error },
}

impl LaunchError {
    pub fn payload_not_found(marker: &[u8]) -> Self {
        LaunchError::PayloadNotFound {
            marker: String::from_utf8_lossy(marker).into_owned(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchError::PayloadNotFound { .. } => EXIT_PAYLOAD_NOT_FOUND,
            LaunchError::Spawn { source, .. } => exit_code_for_io_error(source),
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Keep text stable; wrappers grep for it.
            LaunchError::PayloadNotFound { marker } => {
                write!(f, "Header \"{marker}\" not found in executable")
            }
            LaunchError::Spawn { program, source } => {
                write!(f, "failed to start {program}: {source}")
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::PayloadNotFound { .. } => None,
            LaunchError::Spawn { source, .. } => Some(source),
        }
    }
}

/// Exit code to report for a child that was spawned and waited on.
pub fn exit_code_for_status(status: &ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return exit_code_for_code(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128u8.wrapping_add(sig as u8);
        }
    }
    1
}

/// Narrow a child's exit code to the byte the launcher can return.
///
/// Windows codes are 32-bit (NTSTATUS values included); anything outside
/// 0..=255 becomes 1 so a failing child is never reported as success.
pub fn exit_code_for_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

impl From<io::Error> for LaunchError {
    fn from(source: io::Error) -> Self {
        LaunchError::Spawn {
            program: String::from("child"),
            source,
        }
    }
}
