use crate::error::{CompileError, Expected};
use crate::ir::ast::{self, BinaryOperator, TERNARY_BINDING_POWER};
use crate::span::Span;

use super::lexer::Token;

/// Deepest syntax tree the parser accepts, counting brackets, nested `?:`
/// and operator chains alike. Compiling, evaluating and dropping a tree all
/// recurse once per level, so this bounds their stack use too.
pub const MAX_DEPTH: usize = 256;

/// Parses a complete token stream. Every token before the final
/// [`Token::EndOfCode`] must belong to the expression.
pub fn parse_tokens(tokens: Vec<(Token, Span)>) -> Result<ast::Expr, CompileError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// A parsed subtree together with its depth.
type Operand = (ast::Expr, usize);

fn within_limit(depth: usize, span: Span) -> Result<usize, CompileError> {
    if depth > MAX_DEPTH {
        return Err(CompileError::TooDeep {
            span,
            max: MAX_DEPTH,
        });
    }
    Ok(depth)
}

/// A node whose right operand has not been parsed yet.
enum Wrap {
    Binary {
        op: BinaryOperator,
        left: ast::Expr,
    },
    Ternary {
        condition: ast::Expr,
        then_branch: ast::Expr,
    },
}

impl Wrap {
    fn apply(self, right: ast::Expr) -> ast::Expr {
        match self {
            Wrap::Binary { op, left } => ast::Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            Wrap::Ternary {
                condition,
                then_branch,
            } => ast::Expr::Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(right),
            },
        }
    }
}

struct Pending {
    /// Right binding power of the operator
    power: u8,
    wrap: Wrap,
    /// Depth of the deepest operand already held by `wrap`
    depth: usize,
}

/// Operators still waiting for their right operand, innermost on top.
#[derive(Default)]
struct Wraps(Vec<Pending>);

impl Wraps {
    fn push(&mut self, power: u8, wrap: Wrap, depth: usize) {
        self.0.push(Pending { power, wrap, depth });
    }

    /// Closes every pending operator whose right binding power is at most
    /// `power`, feeding `left` in as the right operand of the innermost one.
    fn unwind(&mut self, left: Operand, power: u8, span: Span) -> Result<Operand, CompileError> {
        let (mut left, mut depth) = left;
        while let Some(top) = self.0.last() {
            if top.power > power {
                break;
            }
            let Some(pending) = self.0.pop() else { break };
            depth = within_limit(pending.depth.max(depth) + 1, span)?;
            left = pending.wrap.apply(left);
        }
        Ok((left, depth))
    }

    fn finish(&mut self, left: Operand, span: Span) -> Result<Operand, CompileError> {
        self.unwind(left, u8::MAX, span)
    }
}

struct Parser {
    tokens: Vec<(Token, Span)>,
    position: usize,
    /// Open brackets and `?` branches around the current position
    nesting: usize,
}

impl Parser {
    fn new(mut tokens: Vec<(Token, Span)>) -> Self {
        if !matches!(tokens.last(), Some((Token::EndOfCode, _))) {
            let end = tokens
                .last()
                .map(|(_, span)| Span { start: span.end, ..*span })
                .unwrap_or_default();
            tokens.push((Token::EndOfCode, end));
        }
        Self {
            tokens,
            position: 0,
            nesting: 0,
        }
    }

    fn parse_program(&mut self) -> Result<ast::Expr, CompileError> {
        let (expr, _) = self.parse_expression()?;
        match self.peek() {
            (Token::EndOfCode, _) => Ok(expr),
            _ => Err(self.unexpected(Expected::EndOfCode)),
        }
    }

    /// Parses one expression up to, but not including, the `)`, `:` or end
    /// of code that terminates it.
    fn parse_expression(&mut self) -> Result<Operand, CompileError> {
        let mut wraps = Wraps::default();

        loop {
            let left = self.parse_atom()?;

            match self.peek() {
                (Token::EndOfCode | Token::Colon | Token::RightBracket, span) => {
                    return wraps.finish(left, span);
                }
                (Token::BinaryOperator(op), span) => {
                    self.advance(); // consume operator
                    let (left_power, right_power) = op.binding_power();
                    let (left, depth) = wraps.unwind(left, left_power, span)?;
                    wraps.push(right_power, Wrap::Binary { op, left }, depth);
                }
                (Token::QuestionMark, span) => {
                    self.advance(); // consume '?'
                    let (left_power, right_power) = TERNARY_BINDING_POWER;
                    let (condition, condition_depth) = wraps.unwind(left, left_power, span)?;
                    let (then_branch, then_depth) = self.parse_nested(span)?;
                    self.expect(Token::Colon, Expected::Colon)?;
                    wraps.push(
                        right_power,
                        Wrap::Ternary {
                            condition,
                            then_branch,
                        },
                        condition_depth.max(then_depth),
                    );
                }
                _ => return Err(self.unexpected(Expected::Operator)),
            }
        }
    }

    /// Parses the expression inside brackets or between `?` and `:`.
    fn parse_nested(&mut self, opened_at: Span) -> Result<Operand, CompileError> {
        self.nesting = within_limit(self.nesting + 1, opened_at)?;
        let operand = self.parse_expression();
        self.nesting -= 1;
        operand
    }

    fn parse_atom(&mut self) -> Result<Operand, CompileError> {
        match self.peek() {
            (Token::Variable, _) => {
                self.advance();
                Ok((ast::Expr::Variable, 1))
            }
            (Token::Number(value), _) => {
                self.advance();
                Ok((ast::Expr::Number(value), 1))
            }
            (Token::LeftBracket, span) => {
                self.advance(); // consume '('
                let (inner, depth) = self.parse_nested(span)?;
                self.expect(Token::RightBracket, Expected::RightBracket)?;
                let depth = within_limit(depth + 1, span)?;
                Ok((ast::Expr::Grouped(Box::new(inner)), depth))
            }
            _ => Err(self.unexpected(Expected::Atom)),
        }
    }

    fn peek(&self) -> (Token, Span) {
        let index = self.position.min(self.tokens.len() - 1);
        self.tokens[index]
    }

    /// Moves past the current token. The trailing end of code is never
    /// consumed.
    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect(&mut self, token: Token, expected: Expected) -> Result<(), CompileError> {
        if self.peek().0 == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: Expected) -> CompileError {
        let (found, span) = self.peek();
        CompileError::SyntaxError {
            span,
            found: found.to_string(),
            expected,
        }
    }
}
