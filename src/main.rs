//! confsync - extension configuration installer
//!
//! Command line front end installing extension default configuration into a
//! site's active configuration.

use clap::Parser;

use confsync::cli::{Cli, Commands};
use confsync::commands;
use confsync::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(cli.site, args),
        Commands::Install(args) => commands::install::run(cli.site, args),
        Commands::Uninstall(args) => commands::uninstall::run(cli.site, args),
        Commands::Reinstall(args) => commands::install::run_reinstall(cli.site, args),
        Commands::List(args) => commands::list::run(cli.site, args),
        Commands::Show(args) => commands::show::run(cli.site, args),
        Commands::Delete(args) => commands::show::run_delete(cli.site, args),
        Commands::Collections => commands::collections::run(cli.site),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
