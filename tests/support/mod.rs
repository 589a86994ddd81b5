/*!
Test support helpers shared across integration tests.

- packaged_image(launcher, payload): launcher bytes + begin + payload + end + fake archive
- install_launcher(dir, name, bytes): write an executable copy of a launcher image
- run_with_env(path, args, env): run a launcher with a controlled environment

Launcher binaries already carry one copy of the begin marker, so a packaged
image built from them needs exactly one more.
*/

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const BEGIN: &[u8] = b"#!/batrunner begin";
pub const END: &[u8] = b"#!/batrunner end";

/// Synthetic image where the launcher's own copy of the begin marker sits in `filler`.
#[allow(dead_code)]
pub fn synthetic_image(filler: &[u8], payload: &[u8], archive: &[u8]) -> Vec<u8> {
    let mut out = b"MZ\x90\0launcher code".to_vec();
    out.extend_from_slice(BEGIN);
    out.extend_from_slice(filler);
    out.extend_from_slice(BEGIN);
    out.extend_from_slice(payload);
    out.extend_from_slice(END);
    out.extend_from_slice(archive);
    out
}

#[allow(dead_code)]
pub fn packaged_image(launcher: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = launcher.to_vec();
    out.extend_from_slice(BEGIN);
    out.extend_from_slice(payload);
    out.extend_from_slice(END);
    out.extend_from_slice(b"PK\x05\x06\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0");
    out
}

#[allow(dead_code)]
pub fn install_launcher(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(path)
}

/// Run with a cleared environment plus `env`; retries briefly on ETXTBSY,
/// which a freshly written executable can hit while other tests fork.
#[allow(dead_code)]
pub fn run_with_env(path: &Path, args: &[&str], env: &[(&str, &str)]) -> io::Result<Output> {
    let mut last = None;
    for _ in 0..20 {
        let mut cmd = Command::new(path);
        cmd.args(args).env_clear();
        for (k, v) in env {
            cmd.env(k, v);
        }
        match cmd.output() {
            Ok(out) => return Ok(out),
            Err(e) if e.raw_os_error() == Some(26) => {
                last = Some(e);
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            Err(e) => return Err(e),
        }
    }
    Err(last.unwrap_or_else(|| io::Error::other("launcher did not start")))
}
