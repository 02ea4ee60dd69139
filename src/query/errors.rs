use super::lexer::Operator;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unmatched ')' at token {position}")]
    UnmatchedCloseParen { position: usize },

    #[error("unmatched '(' at end of input")]
    UnmatchedOpenParen,

    #[error("{operator} needs {needed} operand(s), found {available}")]
    OperatorUnderflow {
        operator: Operator,
        needed: usize,
        available: usize,
    },
}

impl QueryError {
    /// True for both kinds of unbalanced parenthesis.
    pub fn is_malformed_grouping(&self) -> bool {
        matches!(
            self,
            QueryError::UnmatchedCloseParen { .. } | QueryError::UnmatchedOpenParen
        )
    }
}
