use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install one extension and its dependencies:\n    confsync install config_test\n\n\
                   Install several extensions as one batch:\n    confsync install views node\n\n\
                   Print the install report as JSON:\n    confsync install config_test --json")]
pub struct InstallArgs {
    /// Machine names of the extensions to install
    #[arg(required = true, value_name = "EXTENSION")]
    pub extensions: Vec<String>,

    /// Print the install report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the reinstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Restore an extension's shipped defaults:\n    confsync reinstall config_test")]
pub struct ReinstallArgs {
    /// Machine names of the extensions to reinstall
    #[arg(required = true, value_name = "EXTENSION")]
    pub extensions: Vec<String>,
}
