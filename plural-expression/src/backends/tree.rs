use crate::error::EvalError;
use crate::ir::ast::{self, BinaryOperator};

use super::{Backend, Evaluator};

/// Keeps the syntax tree and walks it on every call. Slower than
/// [`super::closure::ClosureBackend`], but simple enough to serve as a
/// reference for it.
pub struct TreeBackend;

impl Backend for TreeBackend {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn compile(&self, expr: ast::Expr) -> Evaluator {
        let interpreter = Interpreter::new(expr);
        Evaluator::new(self.name(), move |n| interpreter.eval(n))
    }
}

#[derive(Debug, Clone)]
pub struct Interpreter {
    expr: ast::Expr,
}

impl Interpreter {
    pub fn new(expr: ast::Expr) -> Self {
        Self { expr }
    }

    /// # Panics
    /// When the expression takes a remainder by zero.
    pub fn eval(&self, n: i64) -> i64 {
        evaluate(&self.expr, n)
    }

    /// Like [`Interpreter::eval`], but reports a remainder by zero instead
    /// of panicking.
    pub fn try_eval(&self, n: i64) -> Result<i64, EvalError> {
        try_evaluate(&self.expr, n)
    }
}

fn evaluate(expr: &ast::Expr, n: i64) -> i64 {
    match expr {
        ast::Expr::Variable => n,
        ast::Expr::Number(value) => *value,
        ast::Expr::Grouped(inner) => evaluate(inner, n),
        ast::Expr::BinaryOp { op, left, right } => op.apply(evaluate(left, n), evaluate(right, n)),
        ast::Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            if evaluate(condition, n) != 0 {
                evaluate(then_branch, n)
            } else {
                evaluate(else_branch, n)
            }
        }
    }
}

fn try_evaluate(expr: &ast::Expr, n: i64) -> Result<i64, EvalError> {
    match expr {
        ast::Expr::Variable => Ok(n),
        ast::Expr::Number(value) => Ok(*value),
        ast::Expr::Grouped(inner) => try_evaluate(inner, n),
        ast::Expr::BinaryOp { op, left, right } => {
            let left = try_evaluate(left, n)?;
            let right = try_evaluate(right, n)?;
            if *op == BinaryOperator::Modulo && right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(op.apply(left, right))
        }
        ast::Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            if try_evaluate(condition, n)? != 0 {
                try_evaluate(then_branch, n)
            } else {
                try_evaluate(else_branch, n)
            }
        }
    }
}
