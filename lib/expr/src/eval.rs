use derive_more::Display;

use super::{Expr, Op};

#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[display(fmt = "Division by zero")]
    DivisionByZero,

    #[display(fmt = "Negative result")]
    NegativeResult,
}

impl std::error::Error for EvalError {}

/// Evaluates an expression tree depth-first, left to right
///
/// Operands fold into the application's first value one at a time. Every
/// node must produce a non-negative value, and the first failure anywhere
/// aborts the whole evaluation
pub fn evaluate(expr: &Expr) -> Result<i64, EvalError> {
    let value = match expr {
        Expr::Constant(v) => *v,
        Expr::Application(op, first, rest) => {
            let mut acc = evaluate(first)?;
            for operand in rest {
                acc = apply(*op, acc, evaluate(operand)?)?;
            }
            acc
        }
    };

    if value < 0 {
        return Err(EvalError::NegativeResult);
    }
    Ok(value)
}

fn apply(op: Op, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    Ok(match op {
        Op::Add => lhs + rhs,
        Op::Sub => lhs - rhs,
        Op::Mul => lhs * rhs,
        Op::Div if rhs == 0 => return Err(EvalError::DivisionByZero),
        Op::Div => lhs / rhs,
    })
}
