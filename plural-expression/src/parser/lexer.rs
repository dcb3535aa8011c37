use std::fmt;

use crate::error::{CompileError, PREVIEW_LEN};
use crate::ir::ast::BinaryOperator;
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Number(i64),
    /// The input variable `n`
    Variable,
    LeftBracket,  // (
    RightBracket, // )
    BinaryOperator(BinaryOperator),
    QuestionMark, // ?
    Colon,        // :
    /// Always the last token of a stream
    EndOfCode,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "number {}", value),
            Self::Variable => f.write_str("`n`"),
            Self::LeftBracket => f.write_str("`(`"),
            Self::RightBracket => f.write_str("`)`"),
            Self::BinaryOperator(op) => write!(f, "`{}`", op),
            Self::QuestionMark => f.write_str("`?`"),
            Self::Colon => f.write_str("`:`"),
            Self::EndOfCode => f.write_str("end of expression"),
        }
    }
}

/// Operator lexemes in matching order. A two-character operator must come
/// before any single-character operator that is its prefix.
pub const OPERATORS: [(&str, BinaryOperator); 12] = [
    ("&&", BinaryOperator::And),
    ("||", BinaryOperator::Or),
    ("==", BinaryOperator::Equal),
    ("!=", BinaryOperator::NotEqual),
    (">=", BinaryOperator::GreaterOrEqual),
    ("<=", BinaryOperator::LessOrEqual),
    (">", BinaryOperator::Greater),
    ("<", BinaryOperator::Less),
    ("+", BinaryOperator::Plus),
    ("-", BinaryOperator::Minus),
    ("*", BinaryOperator::Multiply),
    ("%", BinaryOperator::Modulo),
];

/// One entry of the lexer table.
enum Rule {
    Whitespace,
    Exact(&'static str, Token),
    Digits,
    Operator,
}

/// The lexer table. Rules are tried in order and the first one that
/// matches wins; after every match scanning restarts from the top.
const RULES: [Rule; 8] = [
    Rule::Whitespace,
    Rule::Exact("(", Token::LeftBracket),
    Rule::Exact(")", Token::RightBracket),
    Rule::Exact("n", Token::Variable),
    Rule::Exact("?", Token::QuestionMark),
    Rule::Exact(":", Token::Colon),
    Rule::Digits,
    Rule::Operator,
];

enum Scanned<'a> {
    Skip(usize),
    Token(usize, Token),
    Number(&'a str),
}

impl Rule {
    fn scan<'a>(&self, rest: &'a str) -> Option<Scanned<'a>> {
        match self {
            Rule::Whitespace => {
                let len = rest.len() - rest.trim_start().len();
                (len > 0).then_some(Scanned::Skip(len))
            }
            Rule::Exact(lexeme, token) => rest
                .starts_with(lexeme)
                .then_some(Scanned::Token(lexeme.len(), *token)),
            Rule::Digits => {
                let len = rest.bytes().take_while(u8::is_ascii_digit).count();
                (len > 0).then(|| Scanned::Number(&rest[..len]))
            }
            Rule::Operator => OPERATORS
                .iter()
                .find(|(lexeme, _)| rest.starts_with(lexeme))
                .map(|(lexeme, op)| Scanned::Token(lexeme.len(), Token::BinaryOperator(*op))),
        }
    }
}

/// Splits `source` into tokens, each paired with its location.
///
/// The returned stream always ends with [`Token::EndOfCode`].
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    let mut tokens = Vec::new();
    let mut cursor = Span::default();
    let mut rest = source;

    while !rest.is_empty() {
        let (len, token) = match RULES.iter().find_map(|rule| rule.scan(rest)) {
            Some(Scanned::Skip(len)) => (len, None),
            Some(Scanned::Token(len, token)) => (len, Some(token)),
            Some(Scanned::Number(digits)) => {
                let span = cursor.following(digits.len());
                (digits.len(), Some(parse_number(digits, span)?))
            }
            None => {
                let first = rest.chars().next().map_or(1, char::len_utf8);
                return Err(CompileError::LexerError {
                    span: cursor.following(first),
                    preview: rest.chars().take(PREVIEW_LEN).collect(),
                });
            }
        };

        if let Some(token) = token {
            tokens.push((token, cursor.following(len)));
        }
        let (consumed, remaining) = rest.split_at(len);
        cursor = cursor.advance(consumed);
        rest = remaining;
    }

    tokens.push((Token::EndOfCode, cursor));
    tracing::trace!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

fn parse_number(digits: &str, span: Span) -> Result<Token, CompileError> {
    digits
        .parse()
        .map(Token::Number)
        .map_err(|_| CompileError::NumberTooLarge {
            span,
            digits: digits.to_string(),
        })
}
