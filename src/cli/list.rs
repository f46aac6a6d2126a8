use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List installations:\n    deckhand list\n\n\
                  Names only, for scripting:\n    deckhand list --quiet")]
pub struct ListArgs {
    /// Only print installation names
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
