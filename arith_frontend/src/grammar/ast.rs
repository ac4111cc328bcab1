//! Expression tree produced by the parser
//!
//! Each binary node exclusively owns its operands. Trees are built
//! bottom-up and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators of the grammar, in precedence groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Arithmetic expression AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    FloatLiteral(f64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn literal(value: f64) -> Self {
        Self::FloatLiteral(value)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match op {
            BinaryOp::Add => Self::Add(left, right),
            BinaryOp::Sub => Self::Sub(left, right),
            BinaryOp::Mul => Self::Mul(left, right),
            BinaryOp::Div => Self::Div(left, right),
        }
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Div, left, right)
    }

    /// Operator and operands of a binary node
    pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self {
            Self::FloatLiteral(_) => None,
            Self::Add(l, r) => Some((BinaryOp::Add, l, r)),
            Self::Sub(l, r) => Some((BinaryOp::Sub, l, r)),
            Self::Mul(l, r) => Some((BinaryOp::Mul, l, r)),
            Self::Div(l, r) => Some((BinaryOp::Div, l, r)),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::FloatLiteral(_))
    }

    /// IEEE 754 evaluation; division by zero yields an infinity or NaN
    pub fn evaluate(&self) -> f64 {
        match self {
            Self::FloatLiteral(value) => *value,
            Self::Add(l, r) => l.evaluate() + r.evaluate(),
            Self::Sub(l, r) => l.evaluate() - r.evaluate(),
            Self::Mul(l, r) => l.evaluate() * r.evaluate(),
            Self::Div(l, r) => l.evaluate() / r.evaluate(),
        }
    }

    /// Height of the tree; a literal has depth 1
    pub fn depth(&self) -> usize {
        match self.as_binary() {
            None => 1,
            Some((_, left, right)) => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn node_count(&self) -> usize {
        match self.as_binary() {
            None => 1,
            Some((_, left, right)) => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Prefix rendering, e.g. `(+ 2.0 (* 3.0 4.0))`
    pub fn to_sexpr(&self) -> String {
        match self.as_binary() {
            Some((op, left, right)) => {
                format!("({} {} {})", op, left.to_sexpr(), right.to_sexpr())
            }
            None => self.to_string(),
        }
    }
}

/// Render a literal so that integral values keep a fractional part
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Fully parenthesised infix, e.g. `(2.0 + (3.0 * 4.0))`
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FloatLiteral(value) => f.write_str(&format_number(*value)),
            Self::Add(l, r) => write!(f, "({} + {})", l, r),
            Self::Sub(l, r) => write!(f, "({} - {})", l, r),
            Self::Mul(l, r) => write!(f, "({} * {})", l, r),
            Self::Div(l, r) => write!(f, "({} / {})", l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: f64) -> Expr {
        Expr::literal(value)
    }

    #[test]
    fn test_evaluate_follows_tree_shape() {
        let left_assoc = Expr::div(Expr::div(lit(8.0), lit(4.0)), lit(2.0));
        let right_assoc = Expr::div(lit(8.0), Expr::div(lit(4.0), lit(2.0)));
        assert_eq!(left_assoc.evaluate(), 1.0);
        assert_eq!(right_assoc.evaluate(), 4.0);
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        assert_eq!(Expr::div(lit(1.0), lit(0.0)).evaluate(), f64::INFINITY);
        assert_eq!(Expr::div(lit(-1.0), lit(0.0)).evaluate(), f64::NEG_INFINITY);
        assert!(Expr::div(lit(0.0), lit(0.0)).evaluate().is_nan());
    }

    #[test]
    fn test_rendering() {
        let expr = Expr::add(lit(2.0), Expr::mul(lit(3.0), lit(0.5)));
        assert_eq!(expr.to_string(), "(2.0 + (3.0 * 0.5))");
        assert_eq!(expr.to_sexpr(), "(+ 2.0 (* 3.0 0.5))");
        assert_eq!(lit(12.25).to_string(), "12.25");
    }

    #[test]
    fn test_shape_metrics() {
        let expr = Expr::sub(Expr::add(lit(1.0), lit(2.0)), lit(3.0));
        assert_eq!(expr.depth(), 3);
        assert_eq!(expr.node_count(), 5);
        assert_eq!(lit(1.0).depth(), 1);
        assert!(lit(1.0).is_literal());
        assert_eq!(expr.as_binary().map(|(op, _, _)| op), Some(BinaryOp::Sub));
    }

    #[test]
    fn test_json_shape() {
        let expr = Expr::mul(lit(2.0), lit(4.0));
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Mul": [{"FloatLiteral": 2.0}, {"FloatLiteral": 4.0}]})
        );

        let back: Expr = serde_json::from_value(json).unwrap();
        assert_eq!(back, expr);
    }

    #[test]
    fn test_operator_metadata() {
        assert_eq!(BinaryOp::Div.symbol(), "/");
        assert_eq!(BinaryOp::Sub.apply(5.0, 7.0), -2.0);
    }
}
