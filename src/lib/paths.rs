//! Where the account map, the config and the profile copies live on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::prelude::*;

pub static QUALIFIER: &str = "eu";
pub static ORGANIZATION: &str = "cozysoft";
pub static APPLICATION: &str = "accswitch";

pub static CONFIG_FILE: &str = "config.json";
pub static ACCOUNTS_FILE: &str = "accounts.json";
pub static PROFILES_DIR: &str = "profiles";

/// Resolved locations of every file the switcher persists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_file: PathBuf,
    pub accounts_file: PathBuf,
    pub profiles_dir: PathBuf,
}

impl AppPaths {
    /// Per-user locations, or `None` if no home directory can be found.
    pub fn from_project_dirs() -> Option<Self> {
        let dirs = directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)?;
        Some(Self {
            config_file: dirs.config_dir().join(CONFIG_FILE),
            accounts_file: dirs.data_dir().join(ACCOUNTS_FILE),
            profiles_dir: dirs.data_dir().join(PROFILES_DIR),
        })
    }

    /// Everything below a single directory.
    pub fn under(root: &Path) -> Self {
        Self {
            config_file: root.join(CONFIG_FILE),
            accounts_file: root.join(ACCOUNTS_FILE),
            profiles_dir: root.join(PROFILES_DIR),
        }
    }

    /// Creates missing directories and seeds empty JSON files on first run.
    pub fn ensure(&self) -> SwitcherResult<()> {
        std::fs::create_dir_all(&self.profiles_dir)?;
        for file in [&self.config_file, &self.accounts_file] {
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            if !file.exists() {
                debug!(path = %file.display(), "seeding empty json file");
                std::fs::write(file, "{}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn ensure_seeds_missing_files() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let paths = AppPaths::under(&temp.path().join("home"));

        paths.ensure().expect("bootstrap succeeds");

        assert!(paths.profiles_dir.is_dir());
        assert_eq!(
            std::fs::read_to_string(&paths.accounts_file).expect("accounts file exists"),
            "{}"
        );
        assert_eq!(
            std::fs::read_to_string(&paths.config_file).expect("config file exists"),
            "{}"
        );
    }

    #[test]
    fn ensure_keeps_existing_files() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let paths = AppPaths::under(temp.path());
        std::fs::write(&paths.accounts_file, r#"{"main": "/x.txt"}"#).expect("can seed file");

        paths.ensure().expect("bootstrap succeeds");

        assert_eq!(
            std::fs::read_to_string(&paths.accounts_file).expect("accounts file exists"),
            r#"{"main": "/x.txt"}"#
        );
    }
}
