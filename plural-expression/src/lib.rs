//! Compiler for plural-selection expressions.
//!
//! An expression such as `n % 10 == 1 && n % 100 != 11 ? 0 : 1` is lexed,
//! parsed and compiled once into an [`Evaluator`], which then maps a count
//! `n` to the index of the plural form to use:
//!
//! ```
//! let plural = plural_expression::compile_expression("n != 1").unwrap();
//! assert_eq!(plural.eval(1), 0);
//! assert_eq!(plural.eval(5), 1);
//! ```
//!
//! The language has one variable `n`, non-negative integer literals,
//! brackets, `%` `*` `+` `-`, the comparisons `==` `!=` `>=` `>` `<=` `<`,
//! `&&` `||` and a right-associative `?:`. Comparisons and logic operators
//! produce `0` or `1`; any non-zero value counts as true.

pub mod backends;
pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

pub use backends::{Backend, BackendType, Evaluator};
pub use error::{CompileError, EvalError, Expected};
pub use ir::ast::{BinaryOperator, Expr};
pub use parser::parser::MAX_DEPTH;
pub use span::Span;

/// Compiles `source` with the default closure backend.
pub fn compile_expression(source: &str) -> Result<Evaluator, CompileError> {
    compile_expression_with(source, BackendType::default())
}

/// Compiles `source` with the given backend.
///
/// Lexical and syntax errors, and trees nested deeper than [`MAX_DEPTH`],
/// are returned before any backend runs.
pub fn compile_expression_with(source: &str, backend: BackendType) -> Result<Evaluator, CompileError> {
    let expr = parser::parse(source)?;
    tracing::debug!(backend = backend.name(), "compiling expression");
    Ok(backend.create().compile(expr))
}
