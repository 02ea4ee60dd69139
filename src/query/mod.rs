mod errors;
mod lexer;
mod parser;
mod render;

pub use errors::QueryError;
pub use lexer::{tokenize, Operator, Token};
pub use parser::PostfixNode;
pub use render::{orphaned_operands, render, DEFAULT_FIELD};

/// Tokenize and convert a boolean search expression into postfix order.
///
/// Behavior:
/// - Empty/whitespace → empty sequence
/// - Precedence is `NOT` > `AND` > `OR`; equal precedence resolves left to right
/// - Inside `"..."` keywords and parens are literal text
/// - Unterminated quote → closed at end of input
/// - Unbalanced parens → error
pub fn to_postfix(query: &str) -> Result<Vec<PostfixNode>, QueryError> {
    let tokens = lexer::tokenize(query);
    let count = tokens.len();
    let postfix = parser::parse(tokens)?;
    log::debug!("tokens={count} postfix={}", postfix.len());
    Ok(postfix)
}

/// Full pipeline against the default `text` field.
pub fn to_target_query(query: &str) -> Result<String, QueryError> {
    to_target_query_with_field(query, DEFAULT_FIELD)
}

/// Full pipeline against an explicit field.
///
/// Operators with too few operands fail the call. Operands never joined by an
/// operator (`Apples Oranges`) are dropped, keeping the last one.
pub fn to_target_query_with_field(query: &str, field: &str) -> Result<String, QueryError> {
    let postfix = to_postfix(query)?;
    render::render(&postfix, field)
}
