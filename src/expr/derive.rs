//! Symbolic differentiation.
//!
//! The builders below fold constants and drop identity terms as they go, so
//! `d/dx x^2` comes out as `2 * x` rather than `2 * x^(2 - 1) * 1`.

use std::sync::Arc;

use super::{BinOp, Constant, Expr, Func};

pub(super) fn derivative(expr: &Expr) -> Expr {
    match expr {
        Expr::Num(_) | Expr::Const(_) => num(0.0),
        Expr::Var(_) => {
            if expr.depends_on_x() {
                num(1.0)
            } else {
                num(0.0)
            }
        }
        Expr::Neg(inner) => neg(derivative(inner)),
        Expr::Binary(op, u, v) => {
            let du = derivative(u);
            let dv = derivative(v);
            let u = u.as_ref().clone();
            let v = v.as_ref().clone();
            match op {
                BinOp::Add => add(du, dv),
                BinOp::Sub => sub(du, dv),
                BinOp::Mul => add(mul(du, v.clone()), mul(u, dv)),
                BinOp::Div => div(
                    sub(mul(du, v.clone()), mul(u, dv)),
                    pow(v, num(2.0)),
                ),
                BinOp::Pow => power_rule(u, v, du, dv),
            }
        }
        Expr::Call(func, arg) => {
            let u = arg.as_ref().clone();
            let du = derivative(arg);
            chain(*func, u, du)
        }
    }
}

fn power_rule(u: Expr, v: Expr, du: Expr, dv: Expr) -> Expr {
    if !v.depends_on_x() {
        // v * u^(v-1) * u'
        let exponent = sub(v.clone(), num(1.0));
        return mul(mul(v, pow(u, exponent)), du);
    }
    if !u.depends_on_x() {
        // u^v * ln(u) * v'
        return mul(mul(pow(u.clone(), v), call(Func::Ln, u)), dv);
    }
    // u^v * (v' ln(u) + v u'/u)
    let inner = add(
        mul(dv, call(Func::Ln, u.clone())),
        div(mul(v.clone(), du), u.clone()),
    );
    mul(pow(u, v), inner)
}

fn chain(func: Func, u: Expr, du: Expr) -> Expr {
    let one = || num(1.0);
    let outer = match func {
        Func::Sin => call(Func::Cos, u),
        Func::Cos => neg(call(Func::Sin, u)),
        Func::Tan => div(one(), pow(call(Func::Cos, u), num(2.0))),
        Func::Asin => div(one(), call(Func::Sqrt, sub(one(), pow(u, num(2.0))))),
        Func::Acos => neg(div(one(), call(Func::Sqrt, sub(one(), pow(u, num(2.0)))))),
        Func::Atan => div(one(), add(one(), pow(u, num(2.0)))),
        Func::Sinh => call(Func::Cosh, u),
        Func::Cosh => call(Func::Sinh, u),
        Func::Tanh => div(one(), pow(call(Func::Cosh, u), num(2.0))),
        Func::Sqrt => div(one(), mul(num(2.0), call(Func::Sqrt, u))),
        Func::Exp => call(Func::Exp, u),
        Func::Ln => div(one(), u),
        Func::Log10 => div(one(), mul(u, call(Func::Ln, num(10.0)))),
        Func::Abs => div(u.clone(), call(Func::Abs, u)),
    };
    mul(outer, du)
}

fn num(value: f64) -> Expr {
    Expr::Num(value)
}

fn as_num(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Num(n) => Some(*n),
        _ => None,
    }
}

fn is_num(expr: &Expr, value: f64) -> bool {
    as_num(expr) == Some(value)
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary(op, Arc::new(left), Arc::new(right))
}

fn neg(expr: Expr) -> Expr {
    match expr {
        Expr::Num(n) => num(-n),
        Expr::Neg(inner) => inner.as_ref().clone(),
        other => Expr::Neg(Arc::new(other)),
    }
}

fn add(left: Expr, right: Expr) -> Expr {
    match (as_num(&left), as_num(&right)) {
        (Some(a), Some(b)) => num(a + b),
        (Some(a), _) if a == 0.0 => right,
        (_, Some(b)) if b == 0.0 => left,
        _ => binary(BinOp::Add, left, right),
    }
}

fn sub(left: Expr, right: Expr) -> Expr {
    match (as_num(&left), as_num(&right)) {
        (Some(a), Some(b)) => num(a - b),
        (Some(a), _) if a == 0.0 => neg(right),
        (_, Some(b)) if b == 0.0 => left,
        _ => binary(BinOp::Sub, left, right),
    }
}

fn mul(left: Expr, right: Expr) -> Expr {
    match (as_num(&left), as_num(&right)) {
        (Some(a), Some(b)) => num(a * b),
        (Some(a), _) | (_, Some(a)) if a == 0.0 => num(0.0),
        (Some(a), _) if a == 1.0 => right,
        (_, Some(b)) if b == 1.0 => left,
        (Some(a), _) if a == -1.0 => neg(right),
        (_, Some(b)) if b == -1.0 => neg(left),
        _ => binary(BinOp::Mul, left, right),
    }
}

fn div(left: Expr, right: Expr) -> Expr {
    if is_num(&left, 0.0) && !is_num(&right, 0.0) {
        return num(0.0);
    }
    if is_num(&right, 1.0) {
        return left;
    }
    binary(BinOp::Div, left, right)
}

fn pow(base: Expr, exponent: Expr) -> Expr {
    if is_num(&exponent, 1.0) {
        return base;
    }
    if is_num(&exponent, 0.0) {
        return num(1.0);
    }
    binary(BinOp::Pow, base, exponent)
}

fn call(func: Func, arg: Expr) -> Expr {
    if func == Func::Ln && matches!(arg, Expr::Const(Constant::E)) {
        return num(1.0);
    }
    Expr::Call(func, Arc::new(arg))
}
