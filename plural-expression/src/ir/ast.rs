use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// The input `n`
    Variable,
    /// 0, 1, 100
    Number(i64),
    /// (n + 1), kept to mirror explicit brackets; evaluates as its contents
    Grouped(Box<Expr>),
    /// n == 1 ? 0 : 1
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// n % 10
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    /// Fully bracketed form, so the tree shape is visible in the output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable => f.write_str("n"),
            Self::Number(value) => write!(f, "{}", value),
            Self::Grouped(inner) => write!(f, "({})", inner),
            Self::Ternary {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "({} ? {} : {})", condition, then_branch, else_branch),
            Self::BinaryOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Modulo,         // %
    Multiply,       // *
    Plus,           // +
    Minus,          // -
    Equal,          // ==
    NotEqual,       // !=
    GreaterOrEqual, // >=
    Greater,        // >
    LessOrEqual,    // <=
    Less,           // <
    And,            // &&
    Or,             // ||
}

/// Binding powers of the ternary operator. The right power is looser than
/// the left one, which makes `?:` right-associative.
pub const TERNARY_BINDING_POWER: (u8, u8) = (7, 8);

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Modulo => "%",
            Self::Multiply => "*",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::Less => "<",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// `(left, right)` binding powers; a lower number binds tighter.
    ///
    /// `%` binds tighter than `*`, so `a * b % c` reads as `a * (b % c)`.
    pub fn binding_power(self) -> (u8, u8) {
        match self {
            Self::Modulo => (1, 1),
            Self::Multiply => (2, 2),
            Self::Plus | Self::Minus => (3, 3),
            Self::Equal
            | Self::NotEqual
            | Self::GreaterOrEqual
            | Self::Greater
            | Self::LessOrEqual
            | Self::Less => (4, 4),
            Self::And => (5, 5),
            Self::Or => (6, 6),
        }
    }

    /// Applies the operator to two evaluated operands.
    ///
    /// Arithmetic wraps on overflow. `%` panics when `b` is zero, like any
    /// integer remainder.
    pub fn apply(self, a: i64, b: i64) -> i64 {
        self.function()(a, b)
    }

    /// The operator as a plain function pointer, resolved once at compile time.
    pub fn function(self) -> fn(i64, i64) -> i64 {
        match self {
            Self::Modulo => |a, b| a.wrapping_rem(b),
            Self::Multiply => |a, b| a.wrapping_mul(b),
            Self::Plus => |a, b| a.wrapping_add(b),
            Self::Minus => |a, b| a.wrapping_sub(b),
            Self::Equal => |a, b| (a == b) as i64,
            Self::NotEqual => |a, b| (a != b) as i64,
            Self::GreaterOrEqual => |a, b| (a >= b) as i64,
            Self::Greater => |a, b| (a > b) as i64,
            Self::LessOrEqual => |a, b| (a <= b) as i64,
            Self::Less => |a, b| (a < b) as i64,
            Self::And => |a, b| (a != 0 && b != 0) as i64,
            Self::Or => |a, b| (a != 0 || b != 0) as i64,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
