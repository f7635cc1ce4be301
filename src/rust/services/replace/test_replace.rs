use super::*;
use std::collections::BTreeMap;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Relative path -> contents (`None` for directories) of every entry under `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let contents = entry
                .file_type()
                .is_file()
                .then(|| fs::read(entry.path()).unwrap());
            (relative, contents)
        })
        .collect()
}

fn dist_fixture(root: &Path) -> PathBuf {
    let dist = root.join("dist");
    write(&dist, "index.html", b"<html><body>openLCA</body></html>");
    write(&dist, "assets/app.js", b"console.log('olca');");
    dist
}

#[test]
fn test_copies_into_absent_destination() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let dest = tmp.path().join("home/aicpLCA-data-1.4/html/olca-app");

    let summary = replace(&dist, &dest).unwrap();

    assert!(!summary.removed_previous);
    assert_eq!(summary.files, 2);
    assert_eq!(summary.directories, 1);
    assert_eq!(snapshot(&dest), snapshot(&dist));
    assert_eq!(
        fs::read(dest.join("assets/app.js")).unwrap(),
        b"console.log('olca');"
    );
}

#[test]
fn test_stale_files_are_removed() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let dest = tmp.path().join("olca-app");
    write(&dest, "old.html", b"stale");
    write(&dest, "old/nested/page.html", b"stale too");

    let summary = replace(&dist, &dest).unwrap();

    assert!(summary.removed_previous);
    assert!(!dest.join("old.html").exists());
    assert!(!dest.join("old").exists());
    assert_eq!(snapshot(&dest), snapshot(&dist));
}

#[test]
fn test_replace_is_idempotent() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    write(&dist, "assets/img/logo.svg", b"<svg/>");
    let dest = tmp.path().join("olca-app");

    let first = replace(&dist, &dest).unwrap();
    let after_first = snapshot(&dest);
    let second = replace(&dist, &dest).unwrap();

    assert_eq!(snapshot(&dest), after_first);
    assert!(second.removed_previous);
    assert_eq!(first.files, second.files);
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_missing_source_leaves_destination_removed() {
    let tmp = tempdir().unwrap();
    let dest = tmp.path().join("olca-app");
    write(&dest, "index.html", b"previous deploy");

    let err = replace(tmp.path().join("dist"), &dest).unwrap_err();

    assert!(matches!(err, ReplaceError::SourceNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!dest.exists());
}

#[test]
fn test_source_file_is_rejected() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("dist");
    fs::write(&source, b"not a directory").unwrap();

    let err = replace(&source, tmp.path().join("olca-app")).unwrap_err();

    assert!(matches!(err, ReplaceError::SourceNotDirectory { .. }));
}

#[test]
fn test_file_at_destination_is_a_conflict() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let dest = tmp.path().join("olca-app");
    fs::write(&dest, b"in the way").unwrap();

    let err = replace(&dist, &dest).unwrap_err();

    assert!(matches!(err, ReplaceError::DestinationConflict { .. }));
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dest).unwrap(), b"in the way");
}

#[test]
fn test_remove_destination_tolerates_absence() {
    let tmp = tempdir().unwrap();
    assert!(!remove_destination(&tmp.path().join("nothing-here")).unwrap());
}

#[test]
fn test_empty_source_gives_empty_destination() {
    let tmp = tempdir().unwrap();
    let dist = tmp.path().join("dist");
    fs::create_dir(&dist).unwrap();
    let dest = tmp.path().join("olca-app");
    write(&dest, "old.html", b"stale");

    let summary = replace(&dist, &dest).unwrap();

    assert!(dest.is_dir());
    assert_eq!(summary.files, 0);
    assert!(snapshot(&dest).is_empty());
}

#[test]
fn test_observer_sees_every_entry() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let dest = tmp.path().join("olca-app");
    let mut seen = Vec::new();

    let summary = DirectoryReplacer::new()
        .with_observer(|entry| seen.push(entry.clone()))
        .replace(&dist, &dest)
        .unwrap();

    assert_eq!(seen.len(), summary.files + summary.directories);
    assert!(seen.contains(&CopiedEntry {
        relative: PathBuf::from("assets"),
        kind: EntryKind::Directory,
    }));
    assert!(seen.contains(&CopiedEntry {
        relative: PathBuf::from("index.html"),
        kind: EntryKind::File { bytes: 33 },
    }));
}

#[test]
fn test_modification_time_is_preserved() {
    use std::time::{Duration, SystemTime};

    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
    fs::File::options()
        .write(true)
        .open(dist.join("index.html"))
        .unwrap()
        .set_modified(stamp)
        .unwrap();
    let dest = tmp.path().join("olca-app");

    replace(&dist, &dest).unwrap();

    let copied = fs::metadata(dest.join("index.html")).unwrap();
    assert_eq!(copied.modified().unwrap(), stamp);
}

#[cfg(unix)]
#[test]
fn test_permissions_are_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    write(&dist, "bin/launch.sh", b"#!/bin/sh\n");
    fs::set_permissions(dist.join("bin/launch.sh"), fs::Permissions::from_mode(0o755)).unwrap();
    fs::set_permissions(dist.join("index.html"), fs::Permissions::from_mode(0o444)).unwrap();
    let dest = tmp.path().join("olca-app");

    replace(&dist, &dest).unwrap();

    let mode = |p: &str| fs::metadata(dest.join(p)).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode("bin/launch.sh"), 0o755);
    assert_eq!(mode("index.html"), 0o444);

    // a read-only file from a previous run must not block the next one
    replace(&dist, &dest).unwrap();
    assert_eq!(mode("index.html"), 0o444);
}

#[cfg(unix)]
#[test]
fn test_symlinks_in_source_are_followed() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let shared = tmp.path().join("shared");
    write(&shared, "theme.css", b"body {}");
    std::os::unix::fs::symlink(&shared, dist.join("theme")).unwrap();
    let dest = tmp.path().join("olca-app");

    replace(&dist, &dest).unwrap();

    let copied = dest.join("theme");
    assert!(!fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
    assert_eq!(fs::read(copied.join("theme.css")).unwrap(), b"body {}");
}

#[cfg(unix)]
#[test]
fn test_symlinked_destination_is_not_followed() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let real = tmp.path().join("real");
    write(&real, "keep.html", b"keep");
    let dest = tmp.path().join("olca-app");
    std::os::unix::fs::symlink(&real, &dest).unwrap();

    let err = replace(&dist, &dest).unwrap_err();

    assert!(matches!(err, ReplaceError::DestinationConflict { .. }));
    assert_eq!(fs::read(real.join("keep.html")).unwrap(), b"keep");
}

#[cfg(unix)]
#[test]
fn test_directory_times_are_preserved() {
    use std::time::{Duration, SystemTime};

    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
    fs::File::open(dist.join("assets"))
        .unwrap()
        .set_modified(stamp)
        .unwrap();
    let dest = tmp.path().join("olca-app");

    replace(&dist, &dest).unwrap();

    let copied = fs::metadata(dest.join("assets")).unwrap();
    assert_eq!(copied.modified().unwrap(), stamp);
    assert_eq!(
        fs::metadata(&dest).unwrap().modified().unwrap(),
        fs::metadata(&dist).unwrap().modified().unwrap()
    );
}

#[cfg(unix)]
#[test]
fn test_fifo_in_source_fails_the_copy() {
    let tmp = tempdir().unwrap();
    let dist = dist_fixture(tmp.path());
    let pipe = dist.join("pipe");
    let status = std::process::Command::new("mkfifo")
        .arg(&pipe)
        .status()
        .unwrap();
    assert!(status.success());
    let dest = tmp.path().join("olca-app");

    let err = replace(&dist, &dest).unwrap_err();

    assert!(matches!(err, ReplaceError::SpecialFile { ref path } if *path == pipe));
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(!dest.join("pipe").exists());
}

#[cfg(unix)]
#[test]
fn test_unremovable_destination_is_permission_denied() {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    let tmp = tempdir().unwrap();
    // root ignores mode bits
    if fs::metadata(tmp.path()).unwrap().uid() == 0 {
        return;
    }
    let dist = dist_fixture(tmp.path());
    let html = tmp.path().join("html");
    let dest = html.join("olca-app");
    write(&dest, "index.html", b"previous deploy");
    fs::set_permissions(&html, fs::Permissions::from_mode(0o555)).unwrap();

    let result = replace(&dist, &dest);
    fs::set_permissions(&html, fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    assert!(matches!(err, ReplaceError::Remove { .. }));
    assert!(err.is_permission_denied());
    assert!(dest.exists());
}
