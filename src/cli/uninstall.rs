use clap::Parser;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall an extension:\n    confsync uninstall config_test\n\n\
                  Uninstall an extension and the extensions requiring it:\n    \
                  confsync uninstall config_install_fail_test config_test")]
pub struct UninstallArgs {
    /// Machine names of the extensions to uninstall
    #[arg(required = true, value_name = "EXTENSION")]
    pub extensions: Vec<String>,
}
