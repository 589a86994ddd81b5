//! Child environment: the parent's entries plus the launcher's identity.

use std::ffi::OsString;

use crate::self_image::SelfImage;

/// Resolved self-image path; argv[0] is lost to the child otherwise.
pub const ENV_ARG0: &str = "LAUNCHER_ARG0";
pub const ENV_ISWINDOWS: &str = "LAUNCHER_ISWINDOWS";

/// Ordered `KEY=VALUE` pairs handed to the child as-is.
pub type EnvironmentVector = Vec<(OsString, OsString)>;

/// Parent entries in order, then `LAUNCHER_ARG0` and `LAUNCHER_ISWINDOWS`.
/// Existing keys are neither removed nor de-duplicated; the appended entries
/// come last so they take effect.
pub fn propagate_environment<I>(parent: I, self_image: &SelfImage, is_windows: bool) -> EnvironmentVector
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut out: EnvironmentVector = parent.into_iter().collect();
    out.push((ENV_ARG0.into(), self_image.as_os_str().to_os_string()));
    out.push((
        ENV_ISWINDOWS.into(),
        if is_windows { "true" } else { "false" }.into(),
    ));
    out
}

/// Render as `KEY=VALUE` strings (envp form).
pub fn env_strings(env: &[(OsString, OsString)]) -> Vec<OsString> {
    env.iter()
        .map(|(k, v)| {
            let mut s = OsString::with_capacity(k.len() + v.len() + 1);
            s.push(k);
            s.push("=");
            s.push(v);
            s
        })
        .collect()
}
