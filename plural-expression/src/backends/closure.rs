use crate::ir::ast;

use super::{Backend, Evaluator};

pub type Compiled = Box<dyn Fn(i64) -> i64 + Send + Sync>;

/// Compiles each node into a closure that owns the closures of its
/// children. The tree is walked once here and never again.
pub struct ClosureBackend;

impl Backend for ClosureBackend {
    fn name(&self) -> &'static str {
        "closure"
    }

    fn compile(&self, expr: ast::Expr) -> Evaluator {
        Evaluator::from_boxed(self.name(), compile_expr(expr))
    }
}

pub fn compile_expr(expr: ast::Expr) -> Compiled {
    match expr {
        ast::Expr::Variable => Box::new(|n| n),
        ast::Expr::Number(value) => Box::new(move |_| value),
        ast::Expr::Grouped(inner) => compile_expr(*inner),
        ast::Expr::BinaryOp { op, left, right } => {
            let apply = op.function();
            let left = compile_expr(*left);
            let right = compile_expr(*right);
            Box::new(move |n| apply(left(n), right(n)))
        }
        ast::Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            let condition = compile_expr(*condition);
            let then_branch = compile_expr(*then_branch);
            let else_branch = compile_expr(*else_branch);
            Box::new(move |n| {
                if condition(n) != 0 {
                    then_branch(n)
                } else {
                    else_branch(n)
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn compiled(source: &str) -> Compiled {
        compile_expr(parse(source).unwrap())
    }

    #[test]
    fn test_leaves() {
        let variable = compiled("n");
        let number = compiled("7");
        for n in [-3, 0, 12] {
            assert_eq!(variable(n), n);
            assert_eq!(number(n), 7);
        }
    }

    #[test]
    fn test_grouped_is_transparent() {
        let grouped = compiled("((n))");
        assert_eq!(grouped(5), 5);
    }

    #[test]
    fn test_ternary_only_runs_selected_branch() {
        // The untaken branch would panic with a remainder by zero.
        let f = compiled("n > 0 ? 1 : 1 % 0");
        assert_eq!(f(3), 1);
        let g = compiled("n > 0 ? 1 % 0 : 2");
        assert_eq!(g(-3), 2);
    }

    #[test]
    #[should_panic]
    fn test_logic_operators_evaluate_both_sides() {
        let f = compiled("0 && 1 % 0");
        f(0);
    }

    #[test]
    fn test_russian_plural_rule() {
        let f = compiled(
            "n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2",
        );
        let forms: Vec<i64> = [1, 2, 5, 11, 12, 21, 22, 25, 101, 111, 112].iter().map(|&n| f(n)).collect();
        assert_eq!(forms, vec![0, 1, 2, 2, 2, 0, 1, 2, 0, 2, 2]);
    }
}
