#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// What the switcher should do (opens the interactive menu if omitted)
    #[clap(subcommand)]
    pub subcommand: Option<SubCommand>,

    /// Keep accounts, profiles and config in this directory instead of the per-user default
    #[arg(long)]
    pub home: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    /// List saved accounts and their profile files
    List,
    /// Save a copy of a storage file as a new account
    Add {
        /// Name of the account
        #[arg(short, long)]
        name: String,
        /// Storage file to copy into the profiles directory
        #[arg(short, long)]
        file: String,
        /// Replace an existing account with the same name
        #[arg(long)]
        force: bool,
    },
    /// Delete an account and its profile file
    Delete {
        /// Name of the account
        #[arg(short, long)]
        name: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy an account's profile over the launcher's storage file and start the launcher
    Switch {
        /// Name of the account
        #[arg(short, long)]
        name: String,
    },
    /// Set the launcher executable
    SetLauncher {
        /// Path to the launcher executable
        path: String,
    },
    /// Set the launcher's storage file
    SetStorage {
        /// Path to the storage file the launcher reads
        path: String,
    },
    /// Show where accounts, profiles and config are kept
    Paths,
}
