use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    /// Keywords are case-sensitive: `and` is an ordinary word.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            "NOT" => Some(Operator::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }

    /// Number of operands the operator consumes from the value stack.
    pub fn arity(&self) -> usize {
        match self {
            Operator::Not => 1,
            Operator::And | Operator::Or => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    Quote,
    Operator(Operator),
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Quote => f.write_str("\""),
            Token::Operator(op) => write!(f, "{op}"),
            Token::Word(w) => f.write_str(w),
        }
    }
}

/// Split raw query text into a flat token stream.
///
/// `(`, `)` and `"` always stand alone, whatever surrounds them. Quote scoping
/// is left to the parser, which decides whether a keyword or paren inside a
/// phrase is structural.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut spaced = String::with_capacity(input.len() * 2);
    for ch in input.trim_matches(|c: char| c.is_ascii_whitespace()).chars() {
        match ch {
            '(' | ')' | '"' => {
                spaced.push(' ');
                spaced.push(ch);
                spaced.push(' ');
            }
            _ => spaced.push(ch),
        }
    }

    spaced.split_ascii_whitespace().map(classify).collect()
}

fn classify(unit: &str) -> Token {
    match unit {
        "(" => Token::LParen,
        ")" => Token::RParen,
        "\"" => Token::Quote,
        _ => match Operator::from_keyword(unit) {
            Some(op) => Token::Operator(op),
            None => Token::Word(unit.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str) -> Token {
        Token::Word(w.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n ").is_empty());
    }

    #[test]
    fn test_operators_and_words() {
        assert_eq!(
            tokenize("Apples AND Oranges OR NOT Pears"),
            vec![
                word("Apples"),
                Token::Operator(Operator::And),
                word("Oranges"),
                Token::Operator(Operator::Or),
                Token::Operator(Operator::Not),
                word("Pears"),
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            tokenize("apples and oranges"),
            vec![word("apples"), word("and"), word("oranges")]
        );
    }

    #[test]
    fn test_parens_split_from_words() {
        assert_eq!(
            tokenize("(Apples)OR(Pears)"),
            vec![
                Token::LParen,
                word("Apples"),
                Token::RParen,
                // `)OR(` splits into three units
                Token::Operator(Operator::Or),
                Token::LParen,
                word("Pears"),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_quotes_split_from_words() {
        assert_eq!(
            tokenize("\"Plumps OR Limons\""),
            vec![
                Token::Quote,
                word("Plumps"),
                Token::Operator(Operator::Or),
                word("Limons"),
                Token::Quote,
            ]
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            tokenize("  Appl*\t\tAND\n\nPear  "),
            vec![word("Appl*"), Token::Operator(Operator::And), word("Pear")]
        );
    }

    #[test]
    fn test_only_ascii_whitespace_separates() {
        assert_eq!(
            tokenize("red\u{a0}apple AND pie"),
            vec![
                word("red\u{a0}apple"),
                Token::Operator(Operator::And),
                word("pie")
            ]
        );
        assert_eq!(tokenize("\u{a0}"), vec![word("\u{a0}")]);
    }

    #[test]
    fn test_operator_keyword_must_match_whole_unit() {
        assert_eq!(tokenize("ANDROID ORE"), vec![word("ANDROID"), word("ORE")]);
    }

    #[test]
    fn test_token_display() {
        let rendered: Vec<String> = tokenize("( \"a\" NOT b )")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["(", "\"", "a", "\"", "NOT", "b", ")"]);
    }

    #[test]
    fn test_operator_arity() {
        assert_eq!(Operator::Not.arity(), 1);
        assert_eq!(Operator::And.arity(), 2);
        assert_eq!(Operator::Or.arity(), 2);
    }
}
