pub mod lexer;
pub mod parser;

use crate::error::CompileError;
use crate::ir::ast;

/// Turns expression source into its syntax tree.
pub fn parse(source: &str) -> Result<ast::Expr, CompileError> {
    let tokens = lexer::tokenize(source)?;
    let expr = parser::parse_tokens(tokens)?;
    tracing::debug!(%expr, "parsed expression");
    Ok(expr)
}
