// tests/keygen_binary.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

// default logging: no RUST_LOG, no inherited overrides
fn keygen_cmd(cwd: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_keygen"));
    cmd.current_dir(cwd.path())
        .env_remove("RUST_LOG")
        .env_remove("KEYGEN_PRIVKEY_PATH")
        .env_remove("KEYGEN_KEY_MODE");
    cmd
}

fn keygen(cwd: &TempDir, privkey_path: &Path) -> Output {
    keygen_cmd(cwd)
        .env("KEYGEN_PRIVKEY_PATH", privkey_path)
        .output()
        .expect("spawn keygen")
}

fn stderr_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stderr)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn exits_zero_silently_and_writes_both_files() {
    let dir = TempDir::new().unwrap();
    let privkey = dir.path().join("eurydice");

    let out = keygen(&dir, &privkey);
    assert!(out.status.success(), "stderr: {:?}", stderr_lines(&out));
    assert!(stderr_lines(&out).is_empty(), "stderr: {:?}", stderr_lines(&out));
    assert_eq!(fs::read(&privkey).unwrap().len(), 32);
    assert_eq!(fs::read(dir.path().join("eurydice.pub")).unwrap().len(), 32);
}

#[test]
fn exits_one_with_single_line_on_missing_directory() {
    let dir = TempDir::new().unwrap();
    let privkey = dir.path().join("missing").join("eurydice");

    let out = keygen(&dir, &privkey);
    assert_eq!(out.status.code(), Some(1));

    let lines = stderr_lines(&out);
    assert_eq!(lines.len(), 1, "stderr: {lines:?}");
    assert!(lines[0].starts_with("keygen: open "), "stderr: {lines:?}");
}

#[cfg(target_os = "linux")]
#[test]
fn write_failure_exits_one_and_leaves_no_key() {
    let dir = TempDir::new().unwrap();
    let privkey = dir.path().join("eurydice");
    std::os::unix::fs::symlink("/dev/full", &privkey).unwrap();

    let out = keygen(&dir, &privkey);
    assert_eq!(out.status.code(), Some(1));

    let lines = stderr_lines(&out);
    assert_eq!(lines.len(), 1, "stderr: {lines:?}");
    assert!(lines[0].starts_with("keygen: write "), "stderr: {lines:?}");
    assert!(fs::symlink_metadata(&privkey).is_err());
    assert!(fs::symlink_metadata(dir.path().join("eurydice.pub")).is_err());
}

#[test]
fn bad_mode_is_rejected_before_any_write() {
    let dir = TempDir::new().unwrap();
    let privkey = dir.path().join("eurydice");

    let out = keygen_cmd(&dir)
        .env("KEYGEN_PRIVKEY_PATH", &privkey)
        .env("KEYGEN_KEY_MODE", "rw-r--r--")
        .output()
        .expect("spawn keygen");

    assert_eq!(out.status.code(), Some(1));
    let lines = stderr_lines(&out);
    assert_eq!(lines.len(), 1, "stderr: {lines:?}");
    assert!(lines[0].starts_with("Failed to load settings"));
    assert!(!privkey.exists());
}

#[test]
fn dotenv_file_redirects_output_but_environment_wins() {
    let dir = TempDir::new().unwrap();
    let from_file = dir.path().join("from_dotenv");
    let from_env = dir.path().join("from_env");
    fs::write(
        dir.path().join(".env"),
        format!("KEYGEN_PRIVKEY_PATH={}\n", from_file.display()),
    )
    .unwrap();

    let out = keygen_cmd(&dir).output().expect("spawn keygen");
    assert!(out.status.success(), "stderr: {:?}", stderr_lines(&out));
    assert!(from_file.exists());

    fs::remove_file(&from_file).unwrap();
    let out = keygen(&dir, &from_env);
    assert!(out.status.success(), "stderr: {:?}", stderr_lines(&out));
    assert!(from_env.exists());
    assert!(!from_file.exists());
}
