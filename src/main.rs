use std::{
    fmt::{Display, Formatter},
    process::exit,
};

use accswitchlib::{
    config::Config,
    paths::AppPaths,
    prelude::{ConfigKey, SwitcherError},
    store::AccountStore,
    switch::{switch_account, ProcessLauncher},
};
use clap::Parser;
use cli::SubCommand;
use inquire::{error::InquireResult, InquireError};
use strum::{EnumIter, IntoEnumIterator};
use tracing::debug;

mod cli;
mod telemetry;
mod tui;

#[derive(Debug, EnumIter)]
enum MenuOption {
    Switch,
    SwitchStayOpen,
    AddAccount,
    DeleteAccount,
    SetLauncherPath,
    SetStoragePath,
    Quit,
}

impl Display for MenuOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuOption::Switch => write!(f, "Switch account and start the launcher"),
            MenuOption::SwitchStayOpen => write!(
                f,
                "Switch account and start the launcher (keep this menu open)"
            ),
            MenuOption::AddAccount => write!(f, "Add account"),
            MenuOption::DeleteAccount => write!(f, "Delete account"),
            MenuOption::SetLauncherPath => write!(f, "Set launcher path"),
            MenuOption::SetStoragePath => write!(f, "Set storage file path"),
            MenuOption::Quit => write!(f, "Quit"),
        }
    }
}

/// Loaded once at startup and handed to every action
struct Session {
    paths: AppPaths,
    store: AccountStore,
    config: Config,
}

enum Flow {
    Continue,
    Exit,
}

fn switch(session: &Session, close_after: bool) -> InquireResult<Flow> {
    if session.store.is_empty() {
        tui::print_no_accounts();
        return Ok(Flow::Continue);
    }
    let name = tui::prompt_select_account(
        "Select the account to switch to",
        session.store.names(),
    )?;
    let outcome = switch_account(&session.store, &session.config, &name, &ProcessLauncher)?;
    tui::print_switch_success(&outcome);

    if close_after {
        Ok(Flow::Exit)
    } else {
        Ok(Flow::Continue)
    }
}

fn add_account(session: &mut Session) -> InquireResult<Flow> {
    let file = tui::prompt_profile_file()?;
    let name = tui::prompt_account_name()?;

    let overwrite = if session.store.contains(&name) {
        if !tui::prompt_confirm_overwrite(&name)? {
            return Ok(Flow::Continue);
        }
        true
    } else {
        false
    };

    session.store.add(&name, &file, overwrite)?;
    tui::print_account_added(&name);
    Ok(Flow::Continue)
}

fn delete_account(session: &mut Session) -> InquireResult<Flow> {
    if session.store.is_empty() {
        tui::print_no_accounts();
        return Ok(Flow::Continue);
    }
    let name =
        tui::prompt_select_account("Select the account to delete", session.store.names())?;
    if !tui::prompt_confirm_delete(&name)? {
        return Ok(Flow::Continue);
    }

    session.store.delete(&name)?;
    tui::print_account_deleted(&name);
    Ok(Flow::Continue)
}

fn set_config_path(session: &mut Session, key: ConfigKey) -> InquireResult<Flow> {
    let path = tui::prompt_config_path(key, session.config.get(key))?;
    session.config.set(key, &path)?;
    session.config.save(&session.paths.config_file)?;
    tui::print_path_saved(key, session.config.get(key).unwrap_or(path.as_path()));
    Ok(Flow::Continue)
}

fn tui(session: &mut Session) -> InquireResult<()> {
    loop {
        let option = match inquire::Select::new("Select an option", MenuOption::iter().collect())
            .prompt()
        {
            Ok(option) => option,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e),
        };

        let result = match option {
            MenuOption::Switch => switch(session, true),
            MenuOption::SwitchStayOpen => switch(session, false),
            MenuOption::AddAccount => add_account(session),
            MenuOption::DeleteAccount => delete_account(session),
            MenuOption::SetLauncherPath => set_config_path(session, ConfigKey::LauncherPath),
            MenuOption::SetStoragePath => set_config_path(session, ConfigKey::StoragePath),
            MenuOption::Quit => Ok(Flow::Exit),
        };

        match result {
            Ok(Flow::Continue) | Err(InquireError::OperationCanceled) => continue,
            Ok(Flow::Exit) | Err(InquireError::OperationInterrupted) => break,
            Err(e) => {
                debug!("{e}");
                tui::print_error(e);
            }
        }
    }

    Ok(())
}

fn cli(subcommand: SubCommand, session: &mut Session) -> InquireResult<()> {
    match subcommand {
        SubCommand::List => tui::print_accounts(&session.store),
        SubCommand::Add { name, file, force } => {
            let file = tui::expand_path(&file);
            session.store.add(&name, &file, force)?;
            tui::print_account_added(name.trim());
        }
        SubCommand::Delete { name, yes } => {
            if !session.store.contains(&name) {
                return Err(SwitcherError::NotFound(name).into());
            }
            if !yes && !tui::prompt_confirm_delete(&name)? {
                return Ok(());
            }
            session.store.delete(&name)?;
            tui::print_account_deleted(name.trim());
        }
        SubCommand::Switch { name } => {
            let outcome = switch_account(&session.store, &session.config, &name, &ProcessLauncher)?;
            tui::print_switch_success(&outcome);
        }
        SubCommand::SetLauncher { path } => {
            set_config_path_from(session, ConfigKey::LauncherPath, &path)?;
        }
        SubCommand::SetStorage { path } => {
            set_config_path_from(session, ConfigKey::StoragePath, &path)?;
        }
        SubCommand::Paths => tui::print_paths(&session.paths),
    }

    Ok(())
}

fn set_config_path_from(session: &mut Session, key: ConfigKey, input: &str) -> InquireResult<()> {
    let path = tui::expand_path(input);
    session.config.set(key, &path)?;
    session.config.save(&session.paths.config_file)?;
    tui::print_path_saved(key, session.config.get(key).unwrap_or(path.as_path()));
    Ok(())
}

fn main() -> InquireResult<()> {
    let args = cli::CliArgs::parse();
    telemetry::init_tracing(args.verbose);

    let paths = match &args.home {
        Some(home) => AppPaths::under(&tui::expand_path(home)),
        None => match AppPaths::from_project_dirs() {
            Some(paths) => paths,
            None => {
                tui::print_no_home_dir();
                exit(1);
            }
        },
    };
    paths.ensure()?;

    let config = match Config::load(&paths.config_file) {
        Ok(config) => config,
        Err(e) => {
            debug!("{e}");
            tui::print_config_reset(&paths.config_file);
            Config::default()
        }
    };

    let store = match AccountStore::load(&paths) {
        Ok(store) => store,
        Err(e) => {
            debug!("{e}");
            tui::print_accounts_deserialization_error(&paths.accounts_file);
            exit(1);
        }
    };

    let mut session = Session {
        paths,
        store,
        config,
    };

    if let Some(subcommand) = args.subcommand {
        if let Err(e) = cli(subcommand, &mut session) {
            tui::print_error(e);
            exit(1);
        }
    } else {
        tui(&mut session)?;
    }

    Ok(())
}
