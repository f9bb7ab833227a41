use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::prelude::*;

/// User-chosen launcher and storage locations
///
/// Both start out unset and are filled in from the menu or the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launcher_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Config {
    /// Reads the config file, returning an empty config if it does not exist.
    pub fn load(path: &Path) -> SwitcherResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| SwitcherError::CorruptData {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> SwitcherResult<()> {
        debug!(path = %path.display(), "saving config");
        crate::write_json(path, self)
    }

    /// The stored value for `key`, whether or not it still exists.
    pub fn get(&self, key: ConfigKey) -> Option<&Path> {
        match key {
            ConfigKey::LauncherPath => self.launcher_path.as_deref(),
            ConfigKey::StoragePath => self.storage_path.as_deref(),
        }
    }

    /// The stored value for `key` if it is non-empty and exists right now.
    pub fn resolve(&self, key: ConfigKey) -> Option<PathBuf> {
        self.get(key)
            .filter(|path| !path.as_os_str().is_empty() && path.exists())
            .map(Path::to_path_buf)
    }

    /// Points `key` at an existing file, stored as an absolute path.
    pub fn set(&mut self, key: ConfigKey, path: &Path) -> SwitcherResult<()> {
        if !path.is_file() {
            return Err(SwitcherError::NotAFile(path.to_path_buf()));
        }
        let path = crate::absolute(path);
        info!(%key, path = %path.display(), "updating configuration");
        match key {
            ConfigKey::LauncherPath => self.launcher_path = Some(path),
            ConfigKey::StoragePath => self.storage_path = Some(path),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn missing_file_loads_as_unset() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");

        let config = Config::load(&temp.path().join("config.json")).expect("load succeeds");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn null_values_load_as_unset() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"launcher_path": null}"#).expect("can write config");

        let config = Config::load(&path).expect("load succeeds");

        assert_eq!(config.launcher_path, None);
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn malformed_file_is_corrupt_data() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{launcher").expect("can write config");

        let result = Config::load(&path);

        assert!(matches!(result, Err(SwitcherError::CorruptData { .. })));
    }

    #[test]
    fn unset_keys_are_omitted_on_save() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let path = temp.path().join("config.json");

        Config::default().save(&path).expect("save succeeds");

        assert_eq!(std::fs::read_to_string(&path).expect("config exists"), "{}");
    }

    #[test]
    fn set_then_save_then_load_keeps_paths() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let launcher = temp.path().join("launcher");
        std::fs::write(&launcher, "").expect("can write launcher");
        let path = temp.path().join("config.json");

        let mut config = Config::default();
        config
            .set(ConfigKey::LauncherPath, &launcher)
            .expect("launcher exists");
        config.save(&path).expect("save succeeds");

        let loaded = Config::load(&path).expect("load succeeds");
        assert_eq!(loaded, config);
        assert!(loaded.launcher_path.expect("launcher is set").is_absolute());
    }

    #[test]
    fn set_rejects_missing_file() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let mut config = Config::default();

        let result = config.set(ConfigKey::StoragePath, &temp.path().join("nope.txt"));

        assert!(matches!(result, Err(SwitcherError::NotAFile(_))));
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn stale_path_resolves_as_unset() {
        let temp = TempDir::new("accswitch").expect("can create temp directory");
        let storage = temp.path().join("storage.txt");
        std::fs::write(&storage, "token").expect("can write storage");
        let mut config = Config::default();
        config
            .set(ConfigKey::StoragePath, &storage)
            .expect("storage exists");
        assert!(config.resolve(ConfigKey::StoragePath).is_some());

        std::fs::remove_file(&storage).expect("can remove storage");

        assert!(config.get(ConfigKey::StoragePath).is_some());
        assert_eq!(config.resolve(ConfigKey::StoragePath), None);
    }

    #[test]
    fn empty_path_resolves_as_unset() {
        let config = Config {
            launcher_path: Some(PathBuf::new()),
            storage_path: None,
        };

        assert_eq!(config.resolve(ConfigKey::LauncherPath), None);
    }
}
