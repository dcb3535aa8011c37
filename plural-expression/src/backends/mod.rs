pub mod closure;
pub mod tree;

use std::fmt;
use std::sync::Arc;

use crate::ir::ast;

/// Turns a parsed expression into something callable.
pub trait Backend {
    fn name(&self) -> &'static str;
    fn compile(&self, expr: ast::Expr) -> Evaluator;
}

/// A compiled expression: maps the input `n` to the selected value.
///
/// Evaluators are pure, so one instance can be shared between threads and
/// called concurrently. Cloning is cheap and shares the compiled code.
#[derive(Clone)]
pub struct Evaluator {
    backend: &'static str,
    function: Arc<dyn Fn(i64) -> i64 + Send + Sync>,
}

impl Evaluator {
    pub fn new<F>(backend: &'static str, function: F) -> Self
    where
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        Self {
            backend,
            function: Arc::new(function),
        }
    }

    pub fn from_boxed(backend: &'static str, function: Box<dyn Fn(i64) -> i64 + Send + Sync>) -> Self {
        Self {
            backend,
            function: Arc::from(function),
        }
    }

    /// Evaluates the expression for `n`.
    ///
    /// # Panics
    /// When the expression takes a remainder by zero.
    #[inline]
    pub fn eval(&self, n: i64) -> i64 {
        (self.function)(n)
    }

    /// Name of the backend that produced this evaluator.
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    #[default]
    Closure,
    Tree,
}

impl BackendType {
    pub fn all() -> Vec<Self> {
        vec![Self::Closure, Self::Tree]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Closure => "closure",
            Self::Tree => "tree",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Closure => "Nested closures built once, no tree walking per call",
            Self::Tree => "Reference interpreter walking the syntax tree on every call",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|backend| backend.name() == name)
    }

    pub fn create(&self) -> Box<dyn Backend> {
        match self {
            Self::Closure => Box::new(closure::ClosureBackend),
            Self::Tree => Box::new(tree::TreeBackend),
        }
    }
}
