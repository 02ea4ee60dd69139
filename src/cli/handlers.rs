use crate::{
    app::QueryService,
    cli::{
        commands::{PostfixCommand, TokensCommand, TranslateCommand},
        errors::CliResult,
        validation::validate_addr,
        Command,
    },
    config::Config,
    web,
};

/// Dispatch one parsed command. Output goes to stdout.
pub fn run(command: Command, config: Config) -> CliResult<()> {
    match command {
        #[cfg(feature = "markdown-docs")]
        Command::MarkdownDocs {} => {
            clap_markdown::print_help_markdown::<crate::cli::Args>();
        }

        Command::Translate { query, field } => {
            let service = QueryService::new(config);
            let out = TranslateCommand::new(query, field)?.execute(&service)?;
            println!("{out}");
        }

        Command::Postfix { query, json } => {
            let service = QueryService::new(config);
            let out = PostfixCommand::new(query, json).execute(&service)?;
            if !out.is_empty() {
                println!("{out}");
            }
        }

        Command::Tokens { query } => {
            let service = QueryService::new(config);
            let out = TokensCommand::new(query).execute(&service);
            if !out.is_empty() {
                println!("{out}");
            }
        }

        Command::Daemon { addr } => {
            validate_addr(&addr)?;
            web::start_daemon(config, addr)?;
        }
    }

    Ok(())
}
