use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a configuration object:\n    confsync show system.cron\n\n\
                  Show its French override:\n    confsync show system.cron --collection language.fr\n\n\
                  Print as JSON:\n    confsync show system.cron --json")]
pub struct ShowArgs {
    /// Configuration name, e.g. system.cron
    pub name: String,

    /// Collection to read from (defaults to the default collection)
    #[arg(long, short = 'c', default_value = "")]
    pub collection: String,

    /// Print as JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the delete command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Delete a configuration object:\n    confsync delete x.settings\n\n\
                  Delete a stale override:\n    confsync delete x.settings --collection language.fr")]
pub struct DeleteArgs {
    /// Configuration name, e.g. system.cron
    pub name: String,

    /// Collection to delete from (defaults to the default collection)
    #[arg(long, short = 'c', default_value = "")]
    pub collection: String,
}
