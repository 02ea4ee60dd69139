use std::sync::Arc;

use crate::{
    app::errors::AppError,
    config::{is_valid_field, Config},
    query::{self, PostfixNode, Token},
};

/// Query translation bound to a loaded [`Config`]. Holds no per-call state, so
/// one instance can serve any number of threads.
#[derive(Clone, Debug)]
pub struct QueryService {
    config: Arc<Config>,
}

impl QueryService {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self, query: &str) -> Vec<Token> {
        query::tokenize(query)
    }

    pub fn postfix(&self, query: &str) -> Result<Vec<PostfixNode>, AppError> {
        Ok(query::to_postfix(query)?)
    }

    /// Render `query` against `field`, or the configured default field.
    pub fn translate(&self, query: &str, field: Option<&str>) -> Result<String, AppError> {
        let field = field.unwrap_or(self.config.default_field.as_str());
        if !is_valid_field(field) {
            return Err(AppError::InvalidField(field.to_string()));
        }

        let postfix = query::to_postfix(query)?;

        if self.config.reject_orphaned_operands {
            let orphaned = query::orphaned_operands(&postfix)?;
            if orphaned > 0 {
                return Err(AppError::OrphanedOperands(orphaned));
            }
        }

        Ok(query::render(&postfix, field)?)
    }
}
