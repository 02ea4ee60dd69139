use super::errors::QueryError;
use super::lexer::Operator;
use super::parser::PostfixNode;

/// Field every term is rendered against unless the caller picks another one.
pub const DEFAULT_FIELD: &str = "text";

const NEGATION: char = '-';

/// Fold a postfix sequence into the nested-group target syntax.
///
/// Binary groups render as `(<right operand> OP <left operand>)`: the operand
/// produced last comes first. Downstream consumers compare against this exact
/// shape.
pub fn render(postfix: &[PostfixNode], field: &str) -> Result<String, QueryError> {
    let mut values: Vec<String> = Vec::with_capacity(postfix.len());

    for node in postfix {
        match node {
            PostfixNode::Term(term) => values.push(format!("{field}:{term}")),
            PostfixNode::Op(op) => {
                let value = apply(*op, &mut values)?;
                values.push(value);
            }
        }
    }

    if values.len() > 1 {
        log::warn!(
            "{} operand(s) not joined by any operator were dropped",
            values.len() - 1
        );
    }

    Ok(values.pop().unwrap_or_else(|| format!("{field}:*")))
}

fn apply(op: Operator, values: &mut Vec<String>) -> Result<String, QueryError> {
    if values.len() < op.arity() {
        return Err(QueryError::OperatorUnderflow {
            operator: op,
            needed: op.arity(),
            available: values.len(),
        });
    }

    // arity checked above
    let mut pop = || values.pop().unwrap_or_default();
    match op {
        Operator::Not => {
            let value = pop();
            match value.strip_prefix(NEGATION) {
                Some(inner) => Ok(inner.to_string()),
                None => Ok(format!("{NEGATION}{value}")),
            }
        }
        Operator::And | Operator::Or => {
            let first = pop();
            let second = pop();
            Ok(format!("({first} {op} {second})"))
        }
    }
}

/// How many rendered values would be discarded at the end of rendering.
///
/// Fails exactly where [`render`] would.
pub fn orphaned_operands(postfix: &[PostfixNode]) -> Result<usize, QueryError> {
    let mut depth = 0usize;
    for node in postfix {
        match node {
            PostfixNode::Term(_) => depth += 1,
            PostfixNode::Op(op) => {
                if depth < op.arity() {
                    return Err(QueryError::OperatorUnderflow {
                        operator: *op,
                        needed: op.arity(),
                        available: depth,
                    });
                }
                depth = depth - op.arity() + 1;
            }
        }
    }
    Ok(depth.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(t: &str) -> PostfixNode {
        PostfixNode::Term(t.to_string())
    }

    #[test]
    fn test_empty_is_match_all() {
        assert_eq!(render(&[], DEFAULT_FIELD).unwrap(), "text:*");
        assert_eq!(render(&[], "body").unwrap(), "body:*");
    }

    #[test]
    fn test_single_term() {
        assert_eq!(
            render(&[term("\"Apples\"")], DEFAULT_FIELD).unwrap(),
            "text:\"Apples\""
        );
    }

    #[test]
    fn test_binary_puts_latest_operand_first() {
        let postfix = [term("\"A\""), term("\"B\""), PostfixNode::Op(Operator::Or)];
        assert_eq!(
            render(&postfix, DEFAULT_FIELD).unwrap(),
            "(text:\"B\" OR text:\"A\")"
        );
    }

    #[test]
    fn test_not_negates_group() {
        let postfix = [
            term("\"A\""),
            term("\"B\""),
            PostfixNode::Op(Operator::And),
            PostfixNode::Op(Operator::Not),
        ];
        assert_eq!(
            render(&postfix, DEFAULT_FIELD).unwrap(),
            "-(text:\"B\" AND text:\"A\")"
        );
    }

    #[test]
    fn test_double_negation_cancels() {
        let postfix = [
            term("\"A\""),
            PostfixNode::Op(Operator::Not),
            PostfixNode::Op(Operator::Not),
        ];
        assert_eq!(render(&postfix, DEFAULT_FIELD).unwrap(), "text:\"A\"");
    }

    #[test]
    fn test_underflow() {
        assert_eq!(
            render(&[PostfixNode::Op(Operator::Not)], DEFAULT_FIELD),
            Err(QueryError::OperatorUnderflow {
                operator: Operator::Not,
                needed: 1,
                available: 0
            })
        );
        assert_eq!(
            render(&[term("a*"), PostfixNode::Op(Operator::And)], DEFAULT_FIELD),
            Err(QueryError::OperatorUnderflow {
                operator: Operator::And,
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_orphaned_operands_keep_last() {
        let postfix = [term("\"A\""), term("\"B\"")];
        assert_eq!(render(&postfix, DEFAULT_FIELD).unwrap(), "text:\"B\"");
        assert_eq!(orphaned_operands(&postfix).unwrap(), 1);
    }

    #[test]
    fn test_orphaned_operands_count() {
        assert_eq!(orphaned_operands(&[]).unwrap(), 0);
        assert_eq!(
            orphaned_operands(&[term("a"), term("b"), PostfixNode::Op(Operator::And)]).unwrap(),
            0
        );
        assert!(orphaned_operands(&[PostfixNode::Op(Operator::Or)]).is_err());
    }
}
