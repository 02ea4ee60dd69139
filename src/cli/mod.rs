use clap::{Parser, Subcommand};

mod commands;
mod errors;
mod handlers;
mod validation;

pub use commands::{PostfixCommand, TokensCommand, TranslateCommand};
pub use errors::{CliError, CliResult};
pub use handlers::run;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate cli docs in markdown format
    #[cfg(feature = "markdown-docs")]
    #[clap(hide = true)]
    MarkdownDocs {},

    /// Translate a boolean search expression into the target query syntax
    Translate {
        /// e.g. '(Apples OR Pears) AND NOT "green apples"'
        #[clap(allow_hyphen_values = true)]
        query: String,

        /// Field to search (defaults to `default_field` from config.yaml)
        #[clap(short, long)]
        field: Option<String>,
    },
    /// Print the postfix program the query compiles to
    Postfix {
        #[clap(allow_hyphen_values = true)]
        query: String,

        /// Print as a JSON array
        #[clap(short, long, default_value = "false")]
        json: bool,
    },
    /// Print the raw token stream
    #[clap(hide = true)]
    Tokens {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },
    /// Start bq as an HTTP service.
    Daemon {
        /// Bind address (defaults to `listen_addr` from config.yaml)
        #[clap(short, long)]
        addr: Option<String>,
    },
}
