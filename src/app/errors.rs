use crate::query::QueryError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("malformed query: {0}")]
    Query(#[from] QueryError),

    #[error("{0} term(s) are not joined to the rest of the query by any operator")]
    OrphanedOperands(usize),

    #[error("invalid field name {0:?}")]
    InvalidField(String),

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Errors caused by the caller's input rather than by the service.
    pub fn is_bad_input(&self) -> bool {
        !matches!(self, AppError::Other(_))
    }
}
