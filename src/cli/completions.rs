use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    deckhand completions bash > ~/.bash_completion.d/deckhand\n\n\
                  Generate zsh completions:\n    deckhand completions zsh > ~/.zfunc/_deckhand\n\n\
                  Generate fish completions:\n    deckhand completions fish > ~/.config/fish/completions/deckhand.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
