use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn deployed(home: &Path) -> PathBuf {
    home.join("aicpLCA-data-1.4").join("html").join("olca-app")
}

fn sync_cmd(cwd: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("olca-html-sync").expect("binary not found");
    cmd.current_dir(cwd).env("HOME", home);
    cmd
}

#[cfg(unix)]
#[test]
fn cli_deploys_dist_into_home() {
    let tmp = tempdir().expect("create tempdir");
    let project = tmp.path().join("olca-app-html");
    let home = tmp.path().join("home");
    fs::create_dir_all(project.join("dist/assets")).unwrap();
    fs::create_dir_all(&home).unwrap();
    fs::write(project.join("dist/index.html"), b"<html/>").unwrap();
    fs::write(project.join("dist/assets/app.js"), b"app()").unwrap();

    sync_cmd(&project, &home).assert().success();

    let dest = deployed(&home);
    assert_eq!(fs::read(dest.join("index.html")).unwrap(), b"<html/>");
    assert_eq!(fs::read(dest.join("assets/app.js")).unwrap(), b"app()");
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 2);
}

#[cfg(unix)]
#[test]
fn cli_replaces_stale_deploy() {
    let tmp = tempdir().expect("create tempdir");
    let project = tmp.path().join("olca-app-html");
    let home = tmp.path().join("home");
    fs::create_dir_all(project.join("dist")).unwrap();
    fs::write(project.join("dist/index.html"), b"new").unwrap();
    let dest = deployed(&home);
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("old.html"), b"stale").unwrap();
    fs::write(dest.join("index.html"), b"old").unwrap();

    sync_cmd(&project, &home).arg("--verbose").assert().success();

    assert!(!dest.join("old.html").exists());
    assert_eq!(fs::read(dest.join("index.html")).unwrap(), b"new");
}

#[cfg(unix)]
#[test]
fn cli_fails_without_dist() {
    let tmp = tempdir().expect("create tempdir");
    let project = tmp.path().join("olca-app-html");
    let home = tmp.path().join("home");
    fs::create_dir_all(&project).unwrap();
    let dest = deployed(&home);
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("index.html"), b"previous").unwrap();

    sync_cmd(&project, &home)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist").count(1));

    assert!(!dest.exists());
}

#[test]
fn cli_rejects_arguments() {
    let tmp = tempdir().expect("create tempdir");
    sync_cmd(tmp.path(), tmp.path())
        .arg("somewhere")
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn cli_warns_on_empty_dist() {
    let tmp = tempdir().expect("create tempdir");
    let project = tmp.path().join("olca-app-html");
    let home = tmp.path().join("home");
    fs::create_dir_all(project.join("dist")).unwrap();

    sync_cmd(&project, &home)
        .assert()
        .success()
        .stderr(predicate::str::contains("contains no files"));

    assert!(deployed(&home).is_dir());
}
