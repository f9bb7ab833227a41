use std::{fmt, path::PathBuf};

/// The two user-chosen paths a switch depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// The launcher executable that gets started after a switch
    LauncherPath,
    /// The launcher's live storage file that gets overwritten by a switch
    StoragePath,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKey::LauncherPath => write!(f, "launcher path"),
            ConfigKey::StoragePath => write!(f, "storage path"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
/// Errors that can occur when managing or switching accounts
pub enum SwitcherError {
    #[error("Account \"{0}\" does not exist")]
    /// Occurs when an operation references an account name that is not in the store
    NotFound(String),

    #[error("Account \"{0}\" already exists")]
    /// Occurs when adding an account under a taken name without asking to overwrite it
    DuplicateName(String),

    #[error("\"{0}\" is not a valid account name")]
    /// Occurs when a name is empty or cannot be used as a file name
    InvalidName(String),

    #[error("{0} is not a file")]
    /// Occurs when a configured path does not point to an existing file
    NotAFile(PathBuf),

    #[error("Unable to copy {from} to {to}: {source}")]
    /// Occurs when the source of a copy is unreadable or the destination unwritable
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("The {0} is not set or no longer exists")]
    /// Occurs when a switch is attempted before the launcher or storage path is configured
    ///
    /// A configured path whose file has since been deleted counts as unset.
    MissingConfiguration(ConfigKey),

    #[error("Unable to start {path}: {source}")]
    /// Occurs when the launcher process cannot be started
    ///
    /// The storage file has already been replaced at this point.
    Launch {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} contains invalid JSON: {source}")]
    /// Occurs when a persisted JSON file cannot be parsed
    CorruptData {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    /// Forwards the errors from `std::io::Error`
    Io(#[from] std::io::Error),
}

impl From<SwitcherError> for inquire::InquireError {
    fn from(value: SwitcherError) -> Self {
        inquire::InquireError::Custom(Box::new(value))
    }
}

/// A type alias for `Result<T, SwitcherError>`
pub type SwitcherResult<T> = std::result::Result<T, SwitcherError>;
