use std::fmt;

use thiserror::Error;

use crate::span::Span;

/// Longest slice of unconsumed input quoted in a lexer error.
pub const PREVIEW_LEN: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Unexpected characters \"{preview}...\" at {span}")]
    LexerError { span: Span, preview: String },

    #[error("Number literal {digits} at {span} does not fit in 64 bits")]
    NumberTooLarge { span: Span, digits: String },

    #[error("Syntax error at {span}: unexpected {found}, expecting {expected}")]
    SyntaxError {
        span: Span,
        found: String,
        expected: Expected,
    },

    #[error("Expression at {span} nests deeper than {max} levels")]
    TooDeep { span: Span, max: usize },
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            Self::LexerError { span, .. }
            | Self::NumberTooLarge { span, .. }
            | Self::SyntaxError { span, .. }
            | Self::TooDeep { span, .. } => *span,
        }
    }
}

/// What the parser would have accepted where a syntax error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A number, the variable `n` or an opening bracket.
    Atom,
    /// A binary operator, `?`, or something that ends the expression.
    Operator,
    RightBracket,
    Colon,
    EndOfCode,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Atom => "a number, `n` or `(`",
            Self::Operator => "an operator, `?` or the end of the expression",
            Self::RightBracket => "`)`",
            Self::Colon => "`:`",
            Self::EndOfCode => "end of expression",
        };
        f.write_str(text)
    }
}

/// Failure while evaluating with [`crate::backends::tree::Interpreter::try_eval`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("Remainder by zero")]
    DivisionByZero,
}
