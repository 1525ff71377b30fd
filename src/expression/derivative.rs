//! Symbolic first derivative with respect to `x`.
//!
//! Derivatives are built from the usual sum/product/quotient/chain rules and
//! passed through [`simplify`], which folds constants and removes the
//! `0 * u`, `1 * u`, `u + 0`, `u ^ 1` noise the rules produce.

use super::ast::{BinOp, Expr, Func};
use super::errors::ExpressionError;

/// Returns the simplified derivative `d/dx expr`.
pub(crate) fn differentiate(expr: &Expr) -> Result<Expr, ExpressionError> {
    Ok(simplify(d(expr)?))
}

fn d(expr: &Expr) -> Result<Expr, ExpressionError> {
    use BinOp::{Add, Div, Mul, Pow, Sub};

    if expr.is_constant() {
        return Ok(Expr::Const(0.0));
    }

    let derivative = match expr {
        Expr::Const(_) => Expr::Const(0.0),
        Expr::Var => Expr::Const(1.0),
        Expr::Neg(u) => Expr::neg(d(u)?),
        Expr::Binary(Add, u, v) => Expr::binary(Add, d(u)?, d(v)?),
        Expr::Binary(Sub, u, v) => Expr::binary(Sub, d(u)?, d(v)?),
        // (uv)' = u'v + uv'
        Expr::Binary(Mul, u, v) => Expr::binary(
            Add,
            Expr::binary(Mul, d(u)?, (**v).clone()),
            Expr::binary(Mul, (**u).clone(), d(v)?),
        ),
        // (u/v)' = (u'v - uv') / v^2
        Expr::Binary(Div, u, v) => Expr::binary(
            Div,
            Expr::binary(
                Sub,
                Expr::binary(Mul, d(u)?, (**v).clone()),
                Expr::binary(Mul, (**u).clone(), d(v)?),
            ),
            Expr::binary(Pow, (**v).clone(), Expr::Const(2.0)),
        ),
        Expr::Binary(Pow, u, v) => power_rule(u, v)?,
        Expr::Call(func, u) => Expr::binary(Mul, outer(*func, u)?, d(u)?),
    };
    Ok(derivative)
}

/// `d/dx u^v`, split by which side depends on `x`.
fn power_rule(u: &Expr, v: &Expr) -> Result<Expr, ExpressionError> {
    use BinOp::{Add, Div, Mul, Pow, Sub};

    let derivative = if v.is_constant() {
        // c * u^(c-1) * u'
        Expr::binary(
            Mul,
            Expr::binary(
                Mul,
                v.clone(),
                Expr::binary(Pow, u.clone(), Expr::binary(Sub, v.clone(), Expr::Const(1.0))),
            ),
            d(u)?,
        )
    } else if u.is_constant() {
        // u^v * ln(u) * v'
        Expr::binary(
            Mul,
            Expr::binary(
                Mul,
                Expr::binary(Pow, u.clone(), v.clone()),
                Expr::call(Func::Ln, u.clone()),
            ),
            d(v)?,
        )
    } else {
        // u^v * (v' ln(u) + v u' / u)
        Expr::binary(
            Mul,
            Expr::binary(Pow, u.clone(), v.clone()),
            Expr::binary(
                Add,
                Expr::binary(Mul, d(v)?, Expr::call(Func::Ln, u.clone())),
                Expr::binary(Div, Expr::binary(Mul, v.clone(), d(u)?), u.clone()),
            ),
        )
    };
    Ok(derivative)
}

/// Derivative of the outer function evaluated at `u`, i.e. `f'(u)`.
fn outer(func: Func, u: &Expr) -> Result<Expr, ExpressionError> {
    use BinOp::{Div, Mul, Pow, Sub};

    let u = u.clone();
    let one = || Expr::Const(1.0);
    let square = |e: Expr| Expr::binary(Pow, e, Expr::Const(2.0));

    let derivative = match func {
        Func::Sin => Expr::call(Func::Cos, u),
        Func::Cos => Expr::neg(Expr::call(Func::Sin, u)),
        Func::Tan => Expr::binary(Div, one(), square(Expr::call(Func::Cos, u))),
        Func::Asin => Expr::binary(
            Div,
            one(),
            Expr::call(Func::Sqrt, Expr::binary(Sub, one(), square(u))),
        ),
        Func::Acos => Expr::neg(Expr::binary(
            Div,
            one(),
            Expr::call(Func::Sqrt, Expr::binary(Sub, one(), square(u))),
        )),
        Func::Atan => Expr::binary(
            Div,
            one(),
            Expr::binary(BinOp::Add, one(), square(u)),
        ),
        Func::Sinh => Expr::call(Func::Cosh, u),
        Func::Cosh => Expr::call(Func::Sinh, u),
        Func::Tanh => Expr::binary(Div, one(), square(Expr::call(Func::Cosh, u))),
        Func::Exp => Expr::call(Func::Exp, u),
        Func::Ln => Expr::binary(Div, one(), u),
        Func::Log10 => Expr::binary(
            Div,
            one(),
            Expr::binary(Mul, u, Expr::Const(std::f64::consts::LN_10)),
        ),
        Func::Sqrt => Expr::binary(
            Div,
            one(),
            Expr::binary(Mul, Expr::Const(2.0), Expr::call(Func::Sqrt, u)),
        ),
        // undefined at u = 0, where evaluation reports a division by zero
        Func::Abs => Expr::binary(Div, u.clone(), Expr::call(Func::Abs, u)),
        Func::Floor | Func::Ceil | Func::Sign => {
            return Err(ExpressionError::NotDifferentiable { function: func.name() })
        }
    };
    Ok(derivative)
}

/// Bottom-up algebraic simplification.
///
/// Only rewrites that keep the value identical wherever the original is
/// defined; `0 / u` is left alone so domain errors in `u` still surface.
pub(crate) fn simplify(expr: Expr) -> Expr {
    use BinOp::{Add, Div, Mul, Pow, Sub};

    match expr {
        Expr::Neg(inner) => match simplify(*inner) {
            Expr::Const(c) => Expr::Const(-c),
            Expr::Neg(e) => *e,
            e => Expr::neg(e),
        },
        Expr::Call(func, arg) => {
            let arg = simplify(*arg);
            let call = Expr::call(func, arg);
            fold(call)
        }
        Expr::Binary(op, lhs, rhs) => {
            let lhs = simplify(*lhs);
            let rhs = simplify(*rhs);

            match (op, lhs, rhs) {
                (Add, Expr::Const(z), e) | (Add, e, Expr::Const(z)) if z == 0.0 => e,
                (Sub, e, Expr::Const(z)) if z == 0.0 => e,
                (Sub, Expr::Const(z), e) if z == 0.0 => simplify(Expr::neg(e)),
                (Mul, Expr::Const(z), _) | (Mul, _, Expr::Const(z)) if z == 0.0 => Expr::Const(0.0),
                (Mul, Expr::Const(o), e) | (Mul, e, Expr::Const(o)) if o == 1.0 => e,
                (Mul, Expr::Const(m), e) | (Mul, e, Expr::Const(m)) if m == -1.0 => {
                    simplify(Expr::neg(e))
                }
                (Div, e, Expr::Const(o)) if o == 1.0 => e,
                (Pow, e, Expr::Const(o)) if o == 1.0 => e,
                (Pow, _, Expr::Const(z)) if z == 0.0 => Expr::Const(1.0),
                (op, lhs, rhs) => fold(Expr::binary(op, lhs, rhs)),
            }
        }
        leaf => leaf,
    }
}

/// Replaces a constant subtree by its value when evaluation succeeds.
fn fold(expr: Expr) -> Expr {
    if expr.is_constant() {
        if let Ok(value) = expr.eval(0.0) {
            return Expr::Const(value);
        }
    }
    expr
}
