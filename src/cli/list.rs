use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List installed extensions:\n    confsync list\n\n\
                  List every extension found in the site:\n    confsync list --available\n\n\
                  List active configuration objects:\n    confsync list --config\n\n\
                  Show owned configuration and local changes:\n    confsync list --detailed")]
pub struct ListArgs {
    /// List every discovered extension, marking the installed ones
    #[arg(long, conflicts_with = "config")]
    pub available: bool,

    /// List active configuration objects in every collection
    #[arg(long)]
    pub config: bool,

    /// Show owned configuration and whether it changed since install
    #[arg(long)]
    pub detailed: bool,
}
