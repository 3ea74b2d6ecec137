use clap::Parser;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create a site in the current directory:\n    confsync init\n\n\
                  Create a site elsewhere:\n    confsync init ./my-site")]
pub struct InitArgs {
    /// Directory to create the site in (defaults to --site or the current directory)
    pub path: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::{Cli, Commands};
    use super::*;

    #[test]
    fn test_cli_parsing_init() {
        let cli = Cli::try_parse_from(["confsync", "init", "./site"]).unwrap();
        match cli.command {
            Commands::Init(args) => assert_eq!(args.path, Some(PathBuf::from("./site"))),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_no_path() {
        let cli = Cli::try_parse_from(["confsync", "init"]).unwrap();
        match cli.command {
            Commands::Init(args) => assert_eq!(args.path, None),
            _ => panic!("Expected Init command"),
        }
    }
}
