#![cfg(feature = "cli")]

use anyhow::Result;
use std::time::Instant;

use crate::platform::config::DeployLayout;
use crate::services::replace::{CopiedEntry, DirectoryReplacer, EntryKind, ReplaceSummary};
use crate::tools::cli::state::CliContext;
use crate::utils::file::{format_file_size, pluralize};

/// Replaces the deployed app folder with the current build output.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let layout = DeployLayout::from_env()?;
    execute_with_layout(ctx, &layout)
}

pub fn execute_with_layout(ctx: &CliContext, layout: &DeployLayout) -> Result<()> {
    let logger = ctx.logger();
    logger.action(format!(
        "Syncing '{}' into '{}'...",
        layout.source.display(),
        layout.destination.display()
    ));

    let started = Instant::now();
    let mut replacer = DirectoryReplacer::new();
    if ctx.verbose() {
        let logger = logger.clone();
        replacer = replacer.with_observer(move |entry: &CopiedEntry| match entry.kind {
            EntryKind::Directory => logger.debug(format!("{}/", entry.relative.display())),
            EntryKind::File { bytes } => logger.debug(format!(
                "{} ({})",
                entry.relative.display(),
                format_file_size(bytes)
            )),
        });
    }

    // reported once, by `main`
    let summary = replacer.replace(&layout.source, &layout.destination)?;

    if summary.removed_previous {
        logger.info(format!(
            "Removed previous '{}'",
            layout.destination.display()
        ));
    }
    if summary.files == 0 {
        logger.warn(format!(
            "'{}' contains no files; the deployed app is now empty",
            layout.source.display()
        ));
    }
    logger.success(describe(&summary));
    logger.watch(format!(
        "Total sync time: {:.1} ms",
        started.elapsed().as_secs_f64() * 1000.0
    ));

    Ok(())
}

fn describe(summary: &ReplaceSummary) -> String {
    format!(
        "Synced {} in {} ({})",
        pluralize(summary.files, "file", "files"),
        pluralize(summary.directories, "subdirectory", "subdirectories"),
        format_file_size(summary.bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_describe_summary() {
        let summary = ReplaceSummary {
            removed_previous: true,
            directories: 1,
            files: 2,
            bytes: 2048,
        };
        assert_eq!(
            describe(&summary),
            "Synced 2 files in 1 subdirectory (2.00 Kb)"
        );
    }

    #[test]
    fn test_execute_with_layout_deploys_dist() {
        let tmp = tempdir().unwrap();
        let cwd = tmp.path().join("project");
        let home = tmp.path().join("home");
        fs::create_dir_all(cwd.join("dist/assets")).unwrap();
        fs::write(cwd.join("dist/index.html"), b"<html/>").unwrap();
        fs::write(cwd.join("dist/assets/app.js"), b"app()").unwrap();
        let layout = DeployLayout::resolve(&cwd, &home);

        execute_with_layout(&CliContext::new(true), &layout).unwrap();

        assert_eq!(fs::read(layout.destination.join("index.html")).unwrap(), b"<html/>");
        assert_eq!(fs::read(layout.destination.join("assets/app.js")).unwrap(), b"app()");
    }

    #[test]
    fn test_execute_with_layout_reports_missing_dist() {
        let tmp = tempdir().unwrap();
        let layout = DeployLayout::resolve(tmp.path().join("project"), tmp.path().join("home"));

        let err = execute_with_layout(&CliContext::new(false), &layout).unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }
}
