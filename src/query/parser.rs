use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::QueryError;
use super::lexer::{Operator, Token};

/// One step of the postfix program handed to the renderer.
///
/// `Term` values are already in their rendered literal form: `"phrase"` for
/// plain words and phrases, `wild*` unquoted for anything containing `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PostfixNode {
    Term(String),
    Op(Operator),
}

impl PostfixNode {
    fn word(word: &str) -> Self {
        if word.contains('*') {
            PostfixNode::Term(word.to_string())
        } else {
            PostfixNode::Term(format!("\"{word}\""))
        }
    }

    fn phrase(phrase: &str) -> Self {
        PostfixNode::Term(format!("\"{phrase}\""))
    }
}

impl fmt::Display for PostfixNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixNode::Term(t) => write!(f, "TERM {t}"),
            PostfixNode::Op(op) => write!(f, "OP {op}"),
        }
    }
}

enum QuoteState {
    Outside,
    Inside(String),
}

/// Pending entries on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Group,
    Op(Operator),
}

impl Pending {
    /// Binding strength, lower binds tighter. Group markers are the loosest so
    /// no operator resolution ever reaches past an open parenthesis.
    fn binding(&self) -> u8 {
        match self {
            Pending::Op(Operator::Not) => 1,
            Pending::Op(Operator::And) => 2,
            Pending::Op(Operator::Or) => 3,
            Pending::Group => 4,
        }
    }
}

struct Converter {
    output: Vec<PostfixNode>,
    stack: Vec<Pending>,
    quote: QuoteState,
}

impl Converter {
    fn new() -> Self {
        Self {
            output: Vec::new(),
            stack: Vec::new(),
            quote: QuoteState::Outside,
        }
    }

    fn feed(&mut self, position: usize, token: Token) -> Result<(), QueryError> {
        if let QuoteState::Inside(buf) = &mut self.quote {
            match token {
                Token::Quote => self.close_quote(),
                Token::LParen => buf.push('('),
                Token::RParen => {
                    let trimmed = buf.trim().to_string();
                    buf.push_str(&trimmed);
                    buf.push_str(") ");
                }
                Token::Operator(op) => {
                    buf.push_str(op.as_str());
                    buf.push(' ');
                }
                Token::Word(w) => {
                    buf.push_str(&w);
                    buf.push(' ');
                }
            }
            return Ok(());
        }

        match token {
            Token::LParen => self.stack.push(Pending::Group),
            Token::RParen => self.close_group(position)?,
            Token::Quote => self.quote = QuoteState::Inside(String::new()),
            Token::Operator(op) => self.push_operator(op),
            Token::Word(w) => self.output.push(PostfixNode::word(&w)),
        }
        Ok(())
    }

    fn close_quote(&mut self) {
        if let QuoteState::Inside(buf) = std::mem::replace(&mut self.quote, QuoteState::Outside) {
            let phrase = buf.trim();
            if !phrase.is_empty() {
                self.output.push(PostfixNode::phrase(phrase));
            }
        }
    }

    /// Move operators to the output until the matching group marker.
    fn close_group(&mut self, position: usize) -> Result<(), QueryError> {
        loop {
            match self.stack.pop() {
                Some(Pending::Group) => return Ok(()),
                Some(Pending::Op(op)) => self.output.push(PostfixNode::Op(op)),
                None => return Err(QueryError::UnmatchedCloseParen { position }),
            }
        }
    }

    /// Shunting-yard resolution. `NOT` is pushed untouched; since `AND` and `OR`
    /// pop anything binding as tight or tighter, a pending `NOT` always reaches
    /// the output before the next binary operator is resolved.
    fn push_operator(&mut self, op: Operator) {
        if op != Operator::Not {
            let incoming = Pending::Op(op);
            while let Some(top) = self.stack.last().copied() {
                if top.binding() > incoming.binding() {
                    break;
                }
                self.stack.pop();
                if let Pending::Op(pending) = top {
                    self.output.push(PostfixNode::Op(pending));
                }
            }
        }
        self.stack.push(Pending::Op(op));
    }

    fn finish(mut self) -> Result<Vec<PostfixNode>, QueryError> {
        // an unterminated phrase still counts
        self.close_quote();

        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::Op(op) => self.output.push(PostfixNode::Op(op)),
                Pending::Group => return Err(QueryError::UnmatchedOpenParen),
            }
        }
        Ok(self.output)
    }
}

/// Convert an infix token stream into postfix order.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<PostfixNode>, QueryError> {
    let mut converter = Converter::new();
    for (position, token) in tokens.into_iter().enumerate() {
        converter.feed(position, token)?;
    }
    converter.finish()
}
