//! Expression tree and point evaluation.

use std::fmt;

use super::errors::DomainError;

/// Elementary functions accepted in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Sign,
}

impl Func {
    /// Looks up a function by the name used in expression text.
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "exp" => Func::Exp,
            "ln" | "log" => Func::Ln,
            "log10" => Func::Log10,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "floor" => Func::Floor,
            "ceil" => Func::Ceil,
            "sign" => Func::Sign,
            _ => return None,
        };
        Some(func)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Log10 => "log10",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Floor => "floor",
            Func::Ceil => "ceil",
            Func::Sign => "sign",
        }
    }

    /// Applies the function to `arg`, checking its real domain.
    ///
    /// `x` is the point the whole expression is evaluated at and only
    /// appears in the error.
    fn apply(self, arg: f64, x: f64) -> Result<f64, DomainError> {
        let out_of_domain = || DomainError::OutOfDomain {
            function: self.name(),
            arg,
            x,
        };

        let value = match self {
            Func::Sin => arg.sin(),
            Func::Cos => arg.cos(),
            Func::Tan => arg.tan(),
            Func::Asin | Func::Acos if !(-1.0..=1.0).contains(&arg) => return Err(out_of_domain()),
            Func::Asin => arg.asin(),
            Func::Acos => arg.acos(),
            Func::Atan => arg.atan(),
            Func::Sinh => arg.sinh(),
            Func::Cosh => arg.cosh(),
            Func::Tanh => arg.tanh(),
            Func::Exp => arg.exp(),
            Func::Ln | Func::Log10 if arg <= 0.0 => return Err(out_of_domain()),
            Func::Ln => arg.ln(),
            Func::Log10 => arg.log10(),
            Func::Sqrt if arg < 0.0 => return Err(out_of_domain()),
            Func::Sqrt => arg.sqrt(),
            Func::Abs => arg.abs(),
            Func::Floor => arg.floor(),
            Func::Ceil => arg.ceil(),
            Func::Sign if arg == 0.0 => 0.0,
            Func::Sign => arg.signum(),
        };
        Ok(value)
    }
}

/// Binary operators, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    const fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }

    const fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Pow => 4,
        }
    }
}

/// Parsed real-valued expression in the single variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Var,
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn call(func: Func, arg: Expr) -> Self {
        Expr::Call(func, Box::new(arg))
    }

    pub fn neg(inner: Expr) -> Self {
        Expr::Neg(Box::new(inner))
    }

    /// `true` when the expression does not mention `x`.
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Const(_) => true,
            Expr::Var => false,
            Expr::Neg(inner) | Expr::Call(_, inner) => inner.is_constant(),
            Expr::Binary(_, lhs, rhs) => lhs.is_constant() && rhs.is_constant(),
        }
    }

    /// Evaluates the expression at `x`.
    ///
    /// Every intermediate result must be finite; the first operation that
    /// leaves the real domain is reported.
    pub fn eval(&self, x: f64) -> Result<f64, DomainError> {
        let value = match self {
            Expr::Const(c) => *c,
            Expr::Var => x,
            Expr::Neg(inner) => -inner.eval(x)?,
            Expr::Call(func, arg) => func.apply(arg.eval(x)?, x)?,
            Expr::Binary(op, lhs, rhs) => {
                let l = lhs.eval(x)?;
                let r = rhs.eval(x)?;
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div if r == 0.0 => return Err(DomainError::DivisionByZero { x }),
                    BinOp::Div => l / r,
                    BinOp::Pow if l == 0.0 && r < 0.0 => {
                        return Err(DomainError::DivisionByZero { x })
                    }
                    BinOp::Pow => pow(l, r),
                }
            }
        };

        if !value.is_finite() {
            return Err(DomainError::NonFinite { x, value });
        }
        Ok(value)
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(op, ..) => op.precedence(),
            Expr::Neg(_) => 3,
            Expr::Const(c) if *c < 0.0 => 3,
            Expr::Const(_) | Expr::Var | Expr::Call(..) => 5,
        }
    }
}

/// Integer exponents go through `powi` so `(-2)^3` stays real.
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX) {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{c}"),
            Expr::Var => write!(f, "x"),
            Expr::Neg(inner) => {
                if inner.precedence() < 4 {
                    write!(f, "-({inner})")
                } else {
                    write!(f, "-{inner}")
                }
            }
            Expr::Call(func, arg) => write!(f, "{}({arg})", func.name()),
            Expr::Binary(op, lhs, rhs) => {
                let prec = op.precedence();
                // `^` is right-associative, the others left-associative
                let (lhs_paren, rhs_paren) = match op {
                    BinOp::Pow => (lhs.precedence() <= prec, rhs.precedence() < prec),
                    _ => (lhs.precedence() < prec, rhs.precedence() <= prec),
                };
                write_operand(f, lhs, lhs_paren)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, rhs, rhs_paren)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, paren: bool) -> fmt::Result {
    if paren {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}
