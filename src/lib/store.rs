use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use tracing::{debug, info};

use crate::{paths::AppPaths, prelude::*};

static DEFAULT_EXTENSION: &str = "txt";

/// A named, saved copy of the launcher's storage file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub profile_path: PathBuf,
}

/// Insertion-ordered `name -> profile path` map, persisted as a JSON object
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct AccountMap(Vec<Account>);

impl AccountMap {
    /// Names are stored trimmed, so lookups are too.
    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.0.iter().position(|account| account.name == name)
    }

    fn upsert(&mut self, account: Account) {
        match self.position(&account.name) {
            Some(index) => self.0[index] = account,
            None => self.0.push(account),
        }
    }
}

impl Serialize for AccountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for account in &self.0 {
            map.serialize_entry(&account.name, &account.profile_path)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AccountMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AccountMapVisitor;

        impl<'de> Visitor<'de> for AccountMapVisitor {
            type Value = AccountMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of account names to profile paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AccountMap, A::Error> {
                let mut accounts = AccountMap::default();
                while let Some((name, profile_path)) = access.next_entry::<String, PathBuf>()? {
                    accounts.upsert(Account { name, profile_path });
                }
                Ok(accounts)
            }
        }

        deserializer.deserialize_map(AccountMapVisitor)
    }
}

/// The saved accounts together with the files backing them
///
/// Every mutation is written through to the accounts file immediately.
#[derive(Debug, Clone)]
pub struct AccountStore {
    accounts_file: PathBuf,
    profiles_dir: PathBuf,
    accounts: AccountMap,
}

impl AccountStore {
    /// Reads the account map; an absent file yields an empty store.
    pub fn load(paths: &AppPaths) -> SwitcherResult<Self> {
        let accounts = if paths.accounts_file.exists() {
            let content = std::fs::read_to_string(&paths.accounts_file)?;
            serde_json::from_str(&content).map_err(|source| SwitcherError::CorruptData {
                path: paths.accounts_file.clone(),
                source,
            })?
        } else {
            AccountMap::default()
        };
        debug!(
            path = %paths.accounts_file.display(),
            count = accounts.0.len(),
            "loaded accounts"
        );

        Ok(Self {
            accounts_file: paths.accounts_file.clone(),
            profiles_dir: paths.profiles_dir.clone(),
            accounts,
        })
    }

    /// Overwrites the accounts file with the full map.
    pub fn save(&self) -> SwitcherResult<()> {
        debug!(path = %self.accounts_file.display(), "saving accounts");
        crate::write_json(&self.accounts_file, &self.accounts)
    }

    /// Copies `source` into the profiles directory and records it under `name`.
    ///
    /// An existing account with the same name is only replaced when `overwrite` is set,
    /// otherwise [`SwitcherError::DuplicateName`] is returned and nothing changes.
    pub fn add(&mut self, name: &str, source: &Path, overwrite: bool) -> SwitcherResult<&Account> {
        let name = validate_name(name)?;
        if !overwrite && self.contains(&name) {
            return Err(SwitcherError::DuplicateName(name));
        }

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_EXTENSION);
        let destination = self.profiles_dir.join(format!("{name}.{extension}"));

        // copying a file onto itself truncates it
        let copied = crate::absolute(source) != crate::absolute(&destination);
        if copied {
            let copy_error = |e: std::io::Error| SwitcherError::Copy {
                from: source.to_path_buf(),
                to: destination.clone(),
                source: e,
            };
            std::fs::create_dir_all(&self.profiles_dir).map_err(copy_error)?;
            std::fs::copy(source, &destination).map_err(copy_error)?;
        }

        let old_path = self.get(&name).map(|old| old.profile_path.clone());
        let mut accounts = self.accounts.clone();
        accounts.upsert(Account {
            name: name.clone(),
            profile_path: destination.clone(),
        });
        if let Err(e) = crate::write_json(&self.accounts_file, &accounts) {
            if copied && old_path.as_ref() != Some(&destination) {
                let _ = std::fs::remove_file(&destination);
            }
            return Err(e);
        }
        self.accounts = accounts;

        // an account replaced under a new extension leaves its old file behind
        if let Some(old_path) = old_path.filter(|old| *old != destination) {
            if old_path.exists() {
                std::fs::remove_file(&old_path)?;
            }
        }

        info!(account = %name, path = %destination.display(), "added account");
        self.get(&name).ok_or(SwitcherError::NotFound(name))
    }

    /// Removes `name` from the map together with its profile file.
    ///
    /// A profile file that is already gone is not an error.
    pub fn delete(&mut self, name: &str) -> SwitcherResult<Account> {
        let index = self
            .accounts
            .position(name)
            .ok_or_else(|| SwitcherError::NotFound(name.trim().to_string()))?;

        let mut accounts = self.accounts.clone();
        let removed = accounts.0.remove(index);
        crate::write_json(&self.accounts_file, &accounts)?;
        self.accounts = accounts;

        if removed.profile_path.exists() {
            std::fs::remove_file(&removed.profile_path)?;
        }
        info!(account = %removed.name, "deleted account");
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.position(name).map(|index| &self.accounts.0[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accounts.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.0.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|account| account.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.0.is_empty()
    }
}

/// Trims `name` and checks that it can be used as a file name.
pub fn validate_name(name: &str) -> SwitcherResult<String> {
    const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(FORBIDDEN)
        || trimmed.chars().any(char::is_control)
    {
        return Err(SwitcherError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}
