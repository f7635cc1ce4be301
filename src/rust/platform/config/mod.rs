#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::tools::cli::config::path::{get_cwd, get_home_dir};

/// Build output published by every run, relative to the working directory.
pub const SOURCE_DIR: &str = "dist";
/// aicpLCA data folder inside the user's home directory.
pub const DATA_DIR: &str = "aicpLCA-data-1.4";
pub const HTML_DIR: &str = "html";
pub const APP_DIR: &str = "olca-app";

/// Source and destination of one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployLayout {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl DeployLayout {
    pub fn resolve(cwd: impl AsRef<Path>, home: impl AsRef<Path>) -> Self {
        Self {
            source: cwd.as_ref().join(SOURCE_DIR),
            destination: home
                .as_ref()
                .join(DATA_DIR)
                .join(HTML_DIR)
                .join(APP_DIR),
        }
    }

    /// Resolves the layout against the current working directory and the
    /// invoking user's home directory.
    pub fn from_env() -> Result<Self> {
        let home = get_home_dir()?;
        Ok(Self::resolve(get_cwd(), home))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_layout() {
        let layout = DeployLayout::resolve("/work/olca-app-html", "/home/lca");

        assert_eq!(layout.source, PathBuf::from("/work/olca-app-html/dist"));
        assert_eq!(
            layout.destination,
            PathBuf::from("/home/lca/aicpLCA-data-1.4/html/olca-app")
        );
    }

    #[test]
    fn test_destination_does_not_depend_on_cwd() {
        let a = DeployLayout::resolve("/a", "/home/lca");
        let b = DeployLayout::resolve("/b/c", "/home/lca");

        assert_ne!(a.source, b.source);
        assert_eq!(a.destination, b.destination);
    }
}
