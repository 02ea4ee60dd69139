use crate::{
    app::QueryService,
    cli::{errors::CliResult, validation::*},
};

/// Command for translating a query
#[derive(Debug, Clone)]
pub struct TranslateCommand {
    pub query: String,
    pub field: Option<String>,
}

impl TranslateCommand {
    pub fn new(query: String, field: Option<String>) -> CliResult<Self> {
        validate_field(&field)?;
        Ok(Self { query, field })
    }

    pub fn execute(self, service: &QueryService) -> CliResult<String> {
        Ok(service.translate(&self.query, self.field.as_deref())?)
    }
}

/// Command for printing the postfix program
#[derive(Debug, Clone)]
pub struct PostfixCommand {
    pub query: String,
    pub json: bool,
}

impl PostfixCommand {
    pub fn new(query: String, json: bool) -> Self {
        Self { query, json }
    }

    pub fn execute(self, service: &QueryService) -> CliResult<String> {
        let postfix = service.postfix(&self.query)?;

        if self.json {
            return Ok(serde_json::to_string_pretty(&postfix)?);
        }

        Ok(postfix
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Command for printing the token stream
#[derive(Debug, Clone)]
pub struct TokensCommand {
    pub query: String,
}

impl TokensCommand {
    pub fn new(query: String) -> Self {
        Self { query }
    }

    pub fn execute(self, service: &QueryService) -> String {
        service
            .tokens(&self.query)
            .iter()
            .map(|token| format!("{token:?}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
