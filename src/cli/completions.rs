use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    confsync completions bash > ~/.bash_completion.d/confsync\n\n\
                  Generate zsh completions:\n    confsync completions zsh > ~/.zfunc/_confsync\n\n\
                  Generate fish completions:\n    confsync completions fish > ~/.config/fish/completions/confsync.fish")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
