use std::{
    path::Path,
    process::{Command, Stdio},
};

use tracing::info;

use crate::{config::Config, prelude::*, store::AccountStore};

/// Starts the launcher program after its storage file has been swapped
pub trait Launcher {
    /// Starts `program` without waiting for it to finish.
    fn launch(&self, program: &Path) -> std::io::Result<()>;
}

/// Spawns the launcher as a detached child process
///
/// The child runs from its own directory with all standard streams closed
/// and is never waited on.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &Path) -> std::io::Result<()> {
        let mut command = Command::new(program);
        if let Some(dir) = program.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            command.current_dir(dir);
        }
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        info!(program = %program.display(), pid = child.id(), "started launcher");
        Ok(())
    }
}

/// What a successful switch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub account: String,
    /// `false` when the profile already is the storage file
    pub copied: bool,
}

/// Makes `name` the active account and starts the launcher.
///
/// Both configured paths must exist before anything is touched. The profile is copied
/// over the storage file unless they are the same file, then the launcher is started.
/// A failed launch does not undo the copy.
pub fn switch_account(
    store: &AccountStore,
    config: &Config,
    name: &str,
    launcher: &impl Launcher,
) -> SwitcherResult<SwitchOutcome> {
    let account = store
        .get(name)
        .ok_or_else(|| SwitcherError::NotFound(name.to_string()))?;

    let storage_path = config
        .resolve(ConfigKey::StoragePath)
        .ok_or(SwitcherError::MissingConfiguration(ConfigKey::StoragePath))?;
    let launcher_path = config
        .resolve(ConfigKey::LauncherPath)
        .ok_or(SwitcherError::MissingConfiguration(ConfigKey::LauncherPath))?;

    let copied = crate::absolute(&account.profile_path) != crate::absolute(&storage_path);
    if copied {
        std::fs::copy(&account.profile_path, &storage_path).map_err(|e| SwitcherError::Copy {
            from: account.profile_path.clone(),
            to: storage_path.clone(),
            source: e,
        })?;
    }

    launcher
        .launch(&launcher_path)
        .map_err(|e| SwitcherError::Launch {
            path: launcher_path.clone(),
            source: e,
        })?;

    info!(account = %account.name, copied, "switched account");
    Ok(SwitchOutcome {
        account: account.name.clone(),
        copied,
    })
}
