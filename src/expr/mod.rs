//! Expression engine for plotted functions.
//!
//! Expressions are arithmetic in a single free variable `x`:
//!
//! ```text
//! "x^2 - 3x + 1"   → Binary(Sub, Binary(Pow, x, 2), ...)
//! "sin(2x)/x"      → Binary(Div, Call(Sin, 2*x), x)
//! ```
//!
//! [`Expr::parse`] builds the tree, [`Expr::eval`] evaluates it for one input,
//! [`Expr::derivative`] differentiates it symbolically and `Display` prints it
//! back in a form the parser accepts.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::geom::format_number;

mod derive;
mod parse;

/// Name of the free variable.
pub const VARIABLE: &str = "x";

/// A parsed expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Num(f64),
    /// A named mathematical constant.
    Const(Constant),
    /// A variable reference.
    Var(Arc<str>),
    /// Negation.
    Neg(Arc<Expr>),
    /// A binary operation.
    Binary(BinOp, Arc<Expr>, Arc<Expr>),
    /// A single-argument built-in function.
    Call(Func, Arc<Expr>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation (right-associative).
    Pow,
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// π.
    Pi,
    /// Euler's number.
    E,
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Arcsine.
    Asin,
    /// Arccosine.
    Acos,
    /// Arctangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Square root.
    Sqrt,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm.
    Log10,
    /// Absolute value.
    Abs,
}

/// Error produced while parsing an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Input contained nothing but whitespace.
    #[error("empty expression")]
    Empty,
    /// A character the lexer does not understand.
    #[error("unexpected character `{ch}` at {pos}")]
    UnexpectedChar {
        /// Offending character.
        ch: char,
        /// Byte offset.
        pos: usize,
    },
    /// A token in a position the grammar does not allow.
    #[error("unexpected `{found}` at {pos}")]
    UnexpectedToken {
        /// Text of the offending token.
        found: String,
        /// Byte offset.
        pos: usize,
    },
    /// Input ended in the middle of an expression.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// A call to a function the engine does not provide.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    /// A number literal that does not parse.
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    /// Parentheses, signs or powers nested deeper than the parser allows.
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
    /// More tokens than the parser accepts.
    #[error("expression has more than {0} tokens")]
    TooLong(usize),
}

/// Error produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression refers to a variable with no value.
    #[error("undefined symbol `{0}`")]
    UnboundVariable(String),
}

impl Expr {
    /// Parse an expression in the variable `x`.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        parse::parse(text)
    }

    /// Create a numeric literal.
    pub fn num(value: f64) -> Self {
        Self::Num(value)
    }

    /// Create a reference to the free variable.
    pub fn var() -> Self {
        Self::Var(Arc::from(VARIABLE))
    }

    /// Check whether the expression depends on the free variable.
    pub fn depends_on_x(&self) -> bool {
        match self {
            Self::Num(_) | Self::Const(_) => false,
            Self::Var(name) => name.as_ref() == VARIABLE,
            Self::Neg(inner) | Self::Call(_, inner) => inner.depends_on_x(),
            Self::Binary(_, left, right) => left.depends_on_x() || right.depends_on_x(),
        }
    }

    /// Evaluate with `x` bound to `x`.
    ///
    /// Numeric trouble such as division by zero yields a non-finite value,
    /// not an error; only structural problems are errors.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        self.eval_with(Some(x))
    }

    /// Evaluate an expression that must not mention `x`.
    pub fn eval_const(&self) -> Result<f64, EvalError> {
        self.eval_with(None)
    }

    fn eval_with(&self, x: Option<f64>) -> Result<f64, EvalError> {
        match self {
            Self::Num(n) => Ok(*n),
            Self::Const(c) => Ok(c.value()),
            Self::Var(name) => match x {
                Some(x) if name.as_ref() == VARIABLE => Ok(x),
                _ => Err(EvalError::UnboundVariable(name.to_string())),
            },
            Self::Neg(inner) => Ok(-inner.eval_with(x)?),
            Self::Binary(op, left, right) => {
                let l = left.eval_with(x)?;
                let r = right.eval_with(x)?;
                Ok(op.apply(l, r))
            }
            Self::Call(func, arg) => Ok(func.apply(arg.eval_with(x)?)),
        }
    }

    /// Symbolic derivative with respect to `x`, lightly simplified.
    pub fn derivative(&self) -> Self {
        derive::derivative(self)
    }
}

impl BinOp {
    fn apply(self, l: f64, r: f64) -> f64 {
        match self {
            Self::Add => l + r,
            Self::Sub => l - r,
            Self::Mul => l * r,
            Self::Div => l / r,
            Self::Pow => l.powf(r),
        }
    }

    /// Operator precedence (higher binds tighter).
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    /// Is this operator right-associative?
    pub fn is_right_assoc(self) -> bool {
        matches!(self, Self::Pow)
    }

    /// Symbol for display.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => " * ",
            Self::Div => " / ",
            Self::Pow => "^",
        }
    }
}

// Unary minus sits between multiplication and exponentiation.
const NEG_PRECEDENCE: u8 = 3;

impl Constant {
    /// Numeric value.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    /// Look a constant up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }
}

impl Func {
    /// Look a function up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "sqrt" => Self::Sqrt,
            "exp" => Self::Exp,
            "log" | "ln" => Self::Ln,
            "log10" => Self::Log10,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(func)
    }

    /// Name used when printing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sqrt => "sqrt",
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Log10 => "log10",
            Self::Abs => "abs",
        }
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Sqrt => v.sqrt(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Abs => v.abs(),
        }
    }
}

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Self::Binary(op, _, _) => op.precedence(),
            Self::Neg(_) => NEG_PRECEDENCE,
            Self::Num(n) if *n < 0.0 => NEG_PRECEDENCE,
            _ => u8::MAX,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{}", format_number(*n)),
            Self::Const(c) => write!(f, "{}", c.name()),
            Self::Var(name) => write!(f, "{name}"),
            Self::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_child(f, inner.precedence() <= NEG_PRECEDENCE)
            }
            Self::Binary(op, left, right) => {
                let prec = op.precedence();
                let left_parens = if op.is_right_assoc() {
                    left.precedence() <= prec
                } else {
                    left.precedence() < prec
                };
                let right_parens = if op.is_right_assoc() {
                    right.precedence() < prec
                } else {
                    right.precedence() <= prec
                };
                left.fmt_child(f, left_parens)?;
                write!(f, "{}", op.symbol())?;
                right.fmt_child(f, right_parens)
            }
            Self::Call(func, arg) => write!(f, "{}({arg})", func.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str, x: f64) -> f64 {
        Expr::parse(text).expect("parse").eval(x).expect("eval")
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(eval("x^2 + 1", 3.0), 10.0);
        assert_eq!(eval("2x", 4.0), 8.0);
        assert_eq!(eval("-x^2", 3.0), -9.0);
        assert_eq!(eval("2^3^2", 0.0), 512.0);
        assert!((eval("sin(pi/2)", 0.0) - 1.0).abs() < 1e-12);
        assert!((eval("log(e)", 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        let expr = Expr::parse("1/x").expect("parse");
        assert_eq!(expr.eval(0.0), Ok(f64::INFINITY));
        let root = Expr::parse("sqrt(x)").expect("parse");
        assert!(root.eval(-1.0).expect("eval").is_nan());
    }

    #[test]
    fn unbound_variable_is_an_error() {
        let expr = Expr::parse("x + y").expect("parse");
        assert_eq!(
            expr.eval(1.0),
            Err(EvalError::UnboundVariable("y".to_string()))
        );
        let constant = Expr::parse("x").expect("parse");
        assert!(constant.eval_const().is_err());
        assert_eq!(Expr::parse("2*pi").expect("parse").eval_const(), Ok(std::f64::consts::TAU));
    }

    #[test]
    fn display_roundtrips_through_parser() {
        for text in ["(x + 1) * (x - 1)", "-(x + 1)", "2^(x - 1)", "(-2)^x", "x - (1 - x)", "sin(x)^2"] {
            let expr = Expr::parse(text).expect("parse");
            let printed = expr.to_string();
            let reparsed = Expr::parse(&printed).expect("reparse");
            for x in [-1.5, 0.25, 2.0] {
                let a = expr.eval(x).expect("eval");
                let b = reparsed.eval(x).expect("eval");
                assert!(
                    (a - b).abs() < 1e-12 || (a.is_nan() && b.is_nan()),
                    "{text} printed as {printed}"
                );
            }
        }
    }

    #[test]
    fn depends_on_x() {
        assert!(Expr::parse("2 + sin(x)").expect("parse").depends_on_x());
        assert!(!Expr::parse("2 + pi").expect("parse").depends_on_x());
    }
}
