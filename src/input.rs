//! Parsing of the text inputs: points, lines, functions and teleport targets.
//!
//! Point and line inputs must look like `(a,b)` and `(a,b),(c,d)`. The check
//! is a plain unanchored pattern match, and coordinates are then cut out at
//! fixed comma positions, so inputs whose coordinates themselves contain
//! commas are not supported. Each coordinate is a constant expression
//! (`pi/2`, `sqrt(2)`, ...). A coordinate that fails to evaluate becomes NaN,
//! which makes the resulting object invalid and its insertion a no-op.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::expr::{Expr, ExprError};
use crate::geom::RealPoint;
use crate::objects::{Curve, Line};

static POINT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*,.*\)").expect("point pattern is valid"));
static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*,.*\),\(.*,.*\)").expect("line pattern is valid"));

/// Error returned when a text input cannot be turned into an object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The input does not have the expected shape.
    #[error("expected {expected}, got `{input}`")]
    Format {
        /// Human readable form that was expected.
        expected: &'static str,
        /// The rejected input.
        input: String,
    },
    /// Nothing was entered.
    #[error("empty input")]
    Empty,
    /// The function text does not parse.
    #[error(transparent)]
    Expression(#[from] ExprError),
}

/// Parse a point input such as `(3, 4)` or `(pi, -1/2)`.
pub fn parse_point_input(input: &str) -> Result<RealPoint, InputError> {
    if !POINT_PATTERN.is_match(input) {
        return Err(InputError::Format {
            expected: "(x,y)",
            input: input.to_string(),
        });
    }
    let comma = input.find(',').unwrap_or(input.len());
    let x = coordinate(input, 1, comma);
    let y = coordinate(input, comma + 1, input.len().saturating_sub(1));
    Ok(RealPoint::new(x, y))
}

/// Parse a line input such as `(0,0),(3,4)`.
pub fn parse_line_input(input: &str) -> Result<Line, InputError> {
    if !LINE_PATTERN.is_match(input) {
        return Err(InputError::Format {
            expected: "(x1,y1),(x2,y2)",
            input: input.to_string(),
        });
    }
    let mut commas = input.match_indices(',').map(|(index, _)| index);
    let (Some(first), Some(middle), Some(last)) = (commas.next(), commas.next(), commas.next())
    else {
        return Err(InputError::Format {
            expected: "(x1,y1),(x2,y2)",
            input: input.to_string(),
        });
    };
    let end = input.len().saturating_sub(1);
    let start = RealPoint::new(
        coordinate(input, 1, first),
        coordinate(input, first + 1, middle.saturating_sub(1)),
    );
    let finish = RealPoint::new(
        coordinate(input, middle + 2, last),
        coordinate(input, last + 1, end),
    );
    Ok(Line::new(start, finish))
}

/// Parse a function input, the right-hand side of `f(x) = ...`.
pub fn parse_function_input(input: &str) -> Result<Curve, InputError> {
    if input.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(Curve::parse(input)?)
}

/// Parse a teleport target; same shape as a point input.
pub fn parse_teleport_input(input: &str) -> Result<RealPoint, InputError> {
    parse_point_input(input)
}

/// Evaluate `input[start..end]` as a constant, NaN on any failure.
fn coordinate(input: &str, start: usize, end: usize) -> f64 {
    let text = input.get(start..end).unwrap_or("");
    Expr::parse(text)
        .ok()
        .and_then(|expr| expr.eval_const().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point_input("(3,4)"), Ok(RealPoint::new(3.0, 4.0)));
        assert_eq!(parse_point_input("( 1.5 , -2 )"), Ok(RealPoint::new(1.5, -2.0)));
        let point = parse_point_input("(pi/2,sqrt(4))").expect("point");
        assert!((point.x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(point.y, 2.0);
    }

    #[test]
    fn bad_coordinates_become_nan() {
        let point = parse_point_input("(x,4)").expect("shape matches");
        assert!(point.x.is_nan());
        assert!(!point.is_valid());
        let point = parse_point_input("(,)").expect("shape matches");
        assert!(!point.is_valid());
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(matches!(parse_point_input("3,4"), Err(InputError::Format { .. })));
        assert!(matches!(parse_line_input("(1,2)"), Err(InputError::Format { .. })));
    }

    #[test]
    fn parses_lines() {
        let line = parse_line_input("(0,0),(3,4)").expect("line");
        assert_eq!(line.start, RealPoint::new(0.0, 0.0));
        assert_eq!(line.end, RealPoint::new(3.0, 4.0));
        let line = parse_line_input("(1,-1),(2*2,e^0)").expect("line");
        assert_eq!(line.end, RealPoint::new(4.0, 1.0));
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        let point = parse_point_input("é(1,2)").expect("unanchored match");
        assert!(!point.is_valid());
    }

    #[test]
    fn deeply_nested_input_is_rejected() {
        let nested = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(
            parse_function_input(&nested),
            Err(InputError::Expression(ExprError::TooLong(_)))
        ));
        let signs = format!("{}x", "-".repeat(1_000));
        assert!(matches!(
            parse_function_input(&signs),
            Err(InputError::Expression(ExprError::TooDeep(_)))
        ));
        let point = parse_point_input(&format!("({}1,2)", "-".repeat(1_000))).expect("shape matches");
        assert!(point.x.is_nan());
        assert_eq!(point.y, 2.0);
    }

    #[test]
    fn functions() {
        assert!(matches!(parse_function_input("  "), Err(InputError::Empty)));
        assert!(matches!(parse_function_input("sin("), Err(InputError::Expression(_))));
        assert_eq!(parse_function_input("x^2").expect("curve").source(), "x^2");
    }

    #[test]
    fn teleport_uses_point_shape() {
        assert_eq!(parse_teleport_input("(10,-5)"), Ok(RealPoint::new(10.0, -5.0)));
    }
}
