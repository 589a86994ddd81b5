#![cfg(unix)]

mod support;

use std::fs;
use std::path::Path;

use support::{install_launcher, packaged_image, run_with_env};

fn launcher_bytes(bin: &str) -> Vec<u8> {
    fs::read(bin).expect("read launcher binary")
}

/// Fake runtime that records argv and the launcher variables, then exits 3.
fn install_fake_java(home: &Path, record: &Path) {
    let bin = home.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let script = format!(
        "#!/bin/sh\n\
         for a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{rec}'\n\
         printf 'ARG0=%s\\nISWIN=%s\\n' \"$LAUNCHER_ARG0\" \"$LAUNCHER_ISWINDOWS\" >> '{rec}'\n\
         exit 3\n",
        rec = record.display()
    );
    install_launcher(&bin, "java", script.as_bytes()).unwrap();
}

/// Stand-in for `cmd.exe` on PATH: records argv and the launcher variables, then exits 5.
fn install_fake_shell(bin: &Path, record: &Path) {
    fs::create_dir_all(bin).unwrap();
    let script = format!(
        "#!/bin/sh\n\
         for a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{rec}'\n\
         printf 'ARG0=%s\\nISWIN=%s\\n' \"$LAUNCHER_ARG0\" \"$LAUNCHER_ISWINDOWS\" >> '{rec}'\n\
         exit 5\n",
        rec = record.display()
    );
    install_launcher(bin, "cmd.exe", script.as_bytes()).unwrap();
}

#[test]
fn e2e_batrunner_without_payload_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let exe = install_launcher(
        dir.path(),
        "bare",
        &launcher_bytes(env!("CARGO_BIN_EXE_batrunner")),
    )
    .unwrap();
    let out = run_with_env(&exe, &["x"], &[]).unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(
        stderr.matches("not found in executable").count(),
        1,
        "stderr: {stderr}"
    );
    assert!(!stderr.contains('\x1b'), "stderr: {stderr}");
}

#[test]
fn e2e_batrunner_debug_log_is_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let exe = install_launcher(
        dir.path(),
        "bare",
        &launcher_bytes(env!("CARGO_BIN_EXE_batrunner")),
    )
    .unwrap();
    let out = run_with_env(&exe, &[], &[("LAUNCHER_LOG", "debug")]).unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("DEBUG"), "stderr: {stderr}");
    assert!(!stderr.contains('\x1b'), "stderr: {stderr}");
}

#[test]
fn e2e_batrunner_runs_payload_through_shell_and_propagates_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    let record = dir.path().join("record.txt");
    install_fake_shell(&bin, &record);

    let image = packaged_image(
        &launcher_bytes(env!("CARGO_BIN_EXE_batrunner")),
        b"\r\necho hi)\r\n",
    );
    let exe = install_launcher(dir.path(), "app", &image).unwrap();
    let out = run_with_env(&exe, &["foo", "a b"], &[("PATH", bin.to_str().unwrap())]).unwrap();
    assert_eq!(out.status.code(), Some(5), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let exe_s = exe.display().to_string();
    let got = fs::read_to_string(&record).unwrap();
    let expected = format!(
        "/s\n/q\n/v:on\n/c\n(setlocal enabledelayedexpansion) & (set args=foo \"a b\") & (  echo hi)  \nARG0={exe_s}\nISWIN=true\n"
    );
    assert_eq!(got, expected);
}

#[test]
fn e2e_batrunner_child_success_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    install_launcher(&bin, "cmd.exe", b"#!/bin/sh\nexit 0\n").unwrap();

    let image = packaged_image(&launcher_bytes(env!("CARGO_BIN_EXE_batrunner")), b"echo ok)");
    let exe = install_launcher(dir.path(), "app", &image).unwrap();
    let out = run_with_env(&exe, &[], &[("PATH", bin.to_str().unwrap())]).unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn e2e_batrunner_unterminated_payload_names_end_marker() {
    let dir = tempfile::tempdir().unwrap();
    let mut image = launcher_bytes(env!("CARGO_BIN_EXE_batrunner"));
    image.extend_from_slice(support::BEGIN);
    image.extend_from_slice(b"echo never closed)");
    let exe = install_launcher(dir.path(), "broken", &image).unwrap();
    let out = run_with_env(&exe, &[], &[]).unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("#!/batrunner end"));
}

#[test]
fn e2e_batrunner_missing_shell_exits_127() {
    let dir = tempfile::tempdir().unwrap();
    let image = packaged_image(&launcher_bytes(env!("CARGO_BIN_EXE_batrunner")), b"echo hi)");
    let exe = install_launcher(dir.path(), "app", &image).unwrap();
    // Empty PATH: cmd.exe cannot be found after the payload was extracted.
    let out = run_with_env(&exe, &[], &[("PATH", "")]).unwrap();
    assert_eq!(out.status.code(), Some(127));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cmd.exe"));
}

#[test]
fn e2e_jarrunner_runs_archive_and_propagates_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("jdk");
    let record = dir.path().join("record.txt");
    install_fake_java(&home, &record);

    let exe = install_launcher(
        dir.path(),
        "app",
        &launcher_bytes(env!("CARGO_BIN_EXE_jarrunner")),
    )
    .unwrap();
    let out = run_with_env(
        &exe,
        &["one", "two words"],
        &[("JAVA_HOME", home.to_str().unwrap())],
    )
    .unwrap();
    assert_eq!(out.status.code(), Some(3));

    let exe_s = exe.display().to_string();
    let got = fs::read_to_string(&record).unwrap();
    let expected = format!("-jar\n{exe_s}\none\ntwo words\nARG0={exe_s}\nISWIN=false\n");
    assert_eq!(got, expected);
}

#[test]
fn e2e_jarrunner_reflective_mode_with_classpath() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("jdk");
    let record = dir.path().join("record.txt");
    install_fake_java(&home, &record);

    let exe = install_launcher(
        dir.path(),
        "app",
        &launcher_bytes(env!("CARGO_BIN_EXE_jarrunner")),
    )
    .unwrap();
    let out = run_with_env(
        &exe,
        &["arg"],
        &[
            ("JAVA_HOME", format!("{}/", home.display()).as_str()),
            ("CLASSPATH", "/lib/dep.jar"),
        ],
    )
    .unwrap();
    assert_eq!(out.status.code(), Some(3));

    let exe_s = exe.display().to_string();
    let got = fs::read_to_string(&record).unwrap();
    let expected = format!(
        "-cp\n/lib/dep.jar:{exe_s}\nedu.uidaho.junicon.runtime.util.JarRunner\n{exe_s}\nmanifest\narg\nARG0={exe_s}\nISWIN=false\n"
    );
    assert_eq!(got, expected);
}

#[test]
fn e2e_jarrunner_missing_runtime_exits_127() {
    let dir = tempfile::tempdir().unwrap();
    let exe = install_launcher(
        dir.path(),
        "app",
        &launcher_bytes(env!("CARGO_BIN_EXE_jarrunner")),
    )
    .unwrap();
    let out = run_with_env(&exe, &[], &[("JAVA_HOME", "/nonexistent/jdk")]).unwrap();
    assert_eq!(out.status.code(), Some(127));
    assert!(String::from_utf8_lossy(&out.stderr).contains("/nonexistent/jdk/bin/java"));
}
