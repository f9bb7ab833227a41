use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

use accswitchlib::{
    config::Config,
    paths::AppPaths,
    prelude::{ConfigKey, SwitcherError},
    store::AccountStore,
    switch::{switch_account, Launcher},
};
use tempdir::TempDir;

#[derive(Default)]
struct RecordingLauncher {
    launched: RefCell<Vec<PathBuf>>,
}

impl Launcher for RecordingLauncher {
    fn launch(&self, program: &Path) -> std::io::Result<()> {
        self.launched.borrow_mut().push(program.to_path_buf());
        Ok(())
    }
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).expect("can write test file");
}

#[test]
fn add_configure_switch_and_delete_across_restarts() {
    let temp = TempDir::new("accswitch").expect("can create temp directory");
    let paths = AppPaths::under(&temp.path().join("home"));
    paths.ensure().expect("bootstrap succeeds");

    let launcher_path = temp.path().join("bin").join("launcher");
    let storage_path = temp.path().join("data").join("storage.txt");
    std::fs::create_dir_all(launcher_path.parent().expect("has parent")).expect("can mkdir");
    std::fs::create_dir_all(storage_path.parent().expect("has parent")).expect("can mkdir");
    write(&launcher_path, "");
    write(&storage_path, "logged-in-as-alt");

    let main_source = temp.path().join("main-storage.txt");
    write(&main_source, "logged-in-as-main");

    // first run: save an account and configure both paths
    {
        let mut store = AccountStore::load(&paths).expect("load succeeds");
        store
            .add("main", &main_source, false)
            .expect("add succeeds");
        store
            .add("alt", &storage_path, false)
            .expect("add succeeds");

        let mut config = Config::load(&paths.config_file).expect("config loads");
        config
            .set(ConfigKey::LauncherPath, &launcher_path)
            .expect("launcher exists");
        config
            .set(ConfigKey::StoragePath, &storage_path)
            .expect("storage exists");
        config.save(&paths.config_file).expect("config saves");
    }

    // second run: everything is read back from disk
    let mut store = AccountStore::load(&paths).expect("reload succeeds");
    let config = Config::load(&paths.config_file).expect("config reloads");
    assert_eq!(store.names(), vec!["main", "alt"]);

    let launcher = RecordingLauncher::default();
    let outcome = switch_account(&store, &config, "main", &launcher).expect("switch succeeds");

    assert!(outcome.copied);
    assert_eq!(
        std::fs::read_to_string(&storage_path).expect("storage exists"),
        "logged-in-as-main"
    );
    assert_eq!(launcher.launched.borrow().len(), 1);
    assert!(launcher.launched.borrow()[0].ends_with("bin/launcher"));

    switch_account(&store, &config, "alt", &launcher).expect("switch back succeeds");
    assert_eq!(
        std::fs::read_to_string(&storage_path).expect("storage exists"),
        "logged-in-as-alt"
    );

    let removed = store.delete("main").expect("delete succeeds");
    assert!(!removed.profile_path.exists());
    let reloaded = AccountStore::load(&paths).expect("reload succeeds");
    assert_eq!(reloaded.names(), vec!["alt"]);

    let result = switch_account(&reloaded, &config, "main", &launcher);
    assert!(matches!(result, Err(SwitcherError::NotFound(_))));
    assert_eq!(launcher.launched.borrow().len(), 2);
}

#[test]
fn corrupt_accounts_file_is_reported_not_replaced() {
    let temp = TempDir::new("accswitch").expect("can create temp directory");
    let paths = AppPaths::under(temp.path());
    paths.ensure().expect("bootstrap succeeds");
    write(&paths.accounts_file, "{\"main\": ");

    let result = AccountStore::load(&paths);

    assert!(matches!(result, Err(SwitcherError::CorruptData { .. })));
    assert_eq!(
        std::fs::read_to_string(&paths.accounts_file).expect("accounts exist"),
        "{\"main\": "
    );
}
