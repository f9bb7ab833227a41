use std::path::{Path, PathBuf};

use accswitchlib::{
    paths::AppPaths,
    prelude::ConfigKey,
    store::{validate_name, AccountStore},
    switch::SwitchOutcome,
};
use colored::Colorize;
use inquire::{
    error::InquireResult,
    validator::{ErrorMessage, Validation},
    InquireError, Text,
};

pub fn expand_path(input: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(input).to_string())
}

fn prompt_existing_file(message: &str, help: &str, current: Option<&Path>) -> InquireResult<PathBuf> {
    let current = current.map(|path| path.display().to_string());
    let mut prompt = Text::new(message)
        .with_help_message(help)
        .with_validator(|input: &str| {
            if input.is_empty() {
                return Ok(Validation::Invalid(ErrorMessage::Custom(
                    "Please enter a path!".to_string(),
                )));
            }
            if !expand_path(input).is_file() {
                return Ok(Validation::Invalid(ErrorMessage::Custom(
                    "The path you entered is not an existing file!".to_string(),
                )));
            }
            Ok(Validation::Valid)
        });
    if let Some(current) = &current {
        prompt = prompt.with_default(current);
    }
    let path = prompt.prompt()?;
    Ok(expand_path(&path))
}

pub fn prompt_profile_file() -> InquireResult<PathBuf> {
    prompt_existing_file(
        "Enter the path to the storage file you want to save",
        "This is usually the launcher's storage.txt while you are logged into the account.",
        None,
    )
}

pub fn prompt_account_name() -> InquireResult<String> {
    let name = Text::new("Enter a name for this account")
        .with_help_message("The name is also used for the profile file, so avoid characters like / or ?.")
        .with_validator(|input: &str| match validate_name(input) {
            Ok(_) => Ok(Validation::Valid),
            Err(e) => Ok(Validation::Invalid(ErrorMessage::Custom(e.to_string()))),
        })
        .prompt()?;
    Ok(name.trim().to_string())
}

pub fn prompt_config_path(key: ConfigKey, current: Option<&Path>) -> InquireResult<PathBuf> {
    match key {
        ConfigKey::LauncherPath => prompt_existing_file(
            "Enter the path to the launcher executable",
            "This program is started after every switch.",
            current,
        ),
        ConfigKey::StoragePath => prompt_existing_file(
            "Enter the path to the launcher's storage file",
            "This file is overwritten with the selected account's profile on every switch.",
            current,
        ),
    }
}

pub fn prompt_select_account(message: &str, names: Vec<String>) -> InquireResult<String> {
    inquire::Select::new(message, names).prompt()
}

pub fn prompt_confirm_overwrite(name: &str) -> InquireResult<bool> {
    inquire::Confirm::new(&format!("An account named \"{name}\" already exists. Replace it?"))
        .with_help_message("Its saved profile file will be overwritten.")
        .with_default(false)
        .prompt()
}

pub fn prompt_confirm_delete(name: &str) -> InquireResult<bool> {
    inquire::Confirm::new(&format!("Delete the account \"{name}\"?"))
        .with_help_message("The saved profile file will be deleted as well.")
        .with_default(false)
        .prompt()
}

pub fn print_accounts(store: &AccountStore) {
    if store.is_empty() {
        print_no_accounts();
        return;
    }
    for account in store.iter() {
        println!(
            "{}\t{}",
            account.name.white().bold(),
            account.profile_path.display()
        );
    }
}

pub fn print_paths(paths: &AppPaths) {
    println!("{} {}", "Config:  ".cyan(), paths.config_file.display());
    println!("{} {}", "Accounts:".cyan(), paths.accounts_file.display());
    println!("{} {}", "Profiles:".cyan(), paths.profiles_dir.display());
}

pub fn print_switch_success(outcome: &SwitchOutcome) {
    println!();
    if outcome.copied {
        println!(
            "{}",
            format!("Account \"{}\" activated, the launcher is starting.", outcome.account)
                .bright_green()
        );
    } else {
        println!(
            "{}",
            format!(
                "Account \"{}\" already is the storage file, the launcher is starting.",
                outcome.account
            )
            .bright_green()
        );
    }
    println!();
}

pub fn print_account_added(name: &str) {
    println!();
    println!("{}", format!("Account \"{name}\" saved.").bright_green());
    println!();
}

pub fn print_account_deleted(name: &str) {
    println!();
    println!("{}", format!("Account \"{name}\" deleted.").bright_green());
    println!();
}

pub fn print_path_saved(key: ConfigKey, path: &Path) {
    println!();
    println!(
        "{} {}",
        format!("Saved the {key}:").bright_green(),
        path.display().to_string().white().bold()
    );
    println!();
}

pub fn print_no_accounts() {
    println!();
    println!(
        "{}",
        "No accounts saved yet. Add one from the menu or with the add command.".bright_red()
    );
    println!();
}

pub fn print_no_home_dir() {
    println!();
    println!("{}", "Could not find your home directory. Please make sure you have a home directory or pass --home and try again.".bright_red());
    println!();
}

pub fn print_accounts_deserialization_error(path: &Path) {
    println!();
    println!(
        "{} {}",
        "Could not read the saved accounts. Please make sure this file is valid JSON and try again:"
            .bright_red(),
        path.display().to_string().white().bold()
    );
    println!();
}

pub fn print_config_reset(path: &Path) {
    println!();
    println!(
        "{} {}",
        "The configuration file is not valid JSON, the launcher and storage paths need to be set again:"
            .yellow(),
        path.display().to_string().white().bold()
    );
    println!();
}

pub fn print_error(error: InquireError) {
    println!();
    println!("{}", format!("An error occurred: {error}").bright_red());
    println!();
}
