//! Operator dispatch tables.
//!
//! AST nodes record only which operator they use. At evaluation time the
//! interpreter looks the operator up here and applies the returned function
//! to operands it has already evaluated, so type checking happens at the
//! point of use.
//!
//! | Category   | Operators          | Operands                  | Result  |
//! |------------|--------------------|---------------------------|---------|
//! | arithmetic | `+ - * / %`        | integer, integer          | integer |
//! | concat     | `+`                | string, string            | string  |
//! | logical    | `not and or`       | boolean(s)                | boolean |
//! | relational | `> >= < <=`        | integer, integer          | boolean |
//! | equality   | `== !=`            | same-typed integer/string | boolean |
//! | step       | `++ --`            | integer                   | integer |
//!
//! Integer arithmetic is checked; overflow is an error rather than a wrap.

use crate::error::RuntimeErrorKind;
use crate::value::Value;
use curt_types::ast::{ArithmeticOp, ComparisonOp, NegationOp, StepOp};

/// A binary operation over evaluated operands.
pub type BinaryFn = fn(&Value, &Value) -> Result<Value, RuntimeErrorKind>;

/// A unary operation over an evaluated operand.
pub type UnaryFn = fn(&Value) -> Result<Value, RuntimeErrorKind>;

// ══════════════════════════════════════════════════════════════════════════════
// Tables
// ══════════════════════════════════════════════════════════════════════════════

pub fn arithmetic(op: ArithmeticOp) -> BinaryFn {
    match op {
        ArithmeticOp::Add => add,
        ArithmeticOp::Sub => |l, r| checked("-", l, r, i64::checked_sub),
        ArithmeticOp::Mul => |l, r| checked("*", l, r, i64::checked_mul),
        ArithmeticOp::Div => divide,
        ArithmeticOp::Mod => remainder,
    }
}

pub fn comparison(op: ComparisonOp) -> BinaryFn {
    match op {
        ComparisonOp::Less => |l, r| relational("<", l, r, |a, b| a < b),
        ComparisonOp::LessEq => |l, r| relational("<=", l, r, |a, b| a <= b),
        ComparisonOp::Greater => |l, r| relational(">", l, r, |a, b| a > b),
        ComparisonOp::GreaterEq => |l, r| relational(">=", l, r, |a, b| a >= b),
        ComparisonOp::Eq => |l, r| equality("==", l, r).map(Value::Boolean),
        ComparisonOp::NotEq => |l, r| equality("!=", l, r).map(|eq| Value::Boolean(!eq)),
        ComparisonOp::And => |l, r| logical("and", l, r, |a, b| a && b),
        ComparisonOp::Or => |l, r| logical("or", l, r, |a, b| a || b),
    }
}

pub fn negation(op: NegationOp) -> UnaryFn {
    match op {
        NegationOp::Minus => |v| match v {
            Value::Integer(n) => n
                .checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| overflow("-")),
            other => Err(unary_mismatch("-", other)),
        },
        NegationOp::Not => |v| match v {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => Err(unary_mismatch("not", other)),
        },
    }
}

/// The value a step yields; writing it back is the caller's job.
pub fn step(op: StepOp) -> UnaryFn {
    match op {
        StepOp::Increment => |v| match v {
            Value::Integer(n) => n
                .checked_add(1)
                .map(Value::Integer)
                .ok_or_else(|| overflow("++")),
            other => Err(unary_mismatch("++", other)),
        },
        StepOp::Decrement => |v| match v {
            Value::Integer(n) => n
                .checked_sub(1)
                .map(Value::Integer)
                .ok_or_else(|| overflow("--")),
            other => Err(unary_mismatch("--", other)),
        },
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operations
// ══════════════════════════════════════════════════════════════════════════════

fn add(lv: &Value, rv: &Value) -> Result<Value, RuntimeErrorKind> {
    match (lv, rv) {
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        _ => checked("+", lv, rv, i64::checked_add),
    }
}

fn divide(lv: &Value, rv: &Value) -> Result<Value, RuntimeErrorKind> {
    let (a, b) = integers("/", lv, rv)?;
    if b == 0 {
        return Err(RuntimeErrorKind::DivisionByZero);
    }
    a.checked_div(b).map(Value::Integer).ok_or_else(|| overflow("/"))
}

fn remainder(lv: &Value, rv: &Value) -> Result<Value, RuntimeErrorKind> {
    let (a, b) = integers("%", lv, rv)?;
    if b == 0 {
        return Err(RuntimeErrorKind::ModuloByZero);
    }
    a.checked_rem(b).map(Value::Integer).ok_or_else(|| overflow("%"))
}

fn checked(
    symbol: &str,
    lv: &Value,
    rv: &Value,
    op: fn(i64, i64) -> Option<i64>,
) -> Result<Value, RuntimeErrorKind> {
    let (a, b) = integers(symbol, lv, rv)?;
    op(a, b).map(Value::Integer).ok_or_else(|| overflow(symbol))
}

fn relational(
    symbol: &str,
    lv: &Value,
    rv: &Value,
    op: fn(i64, i64) -> bool,
) -> Result<Value, RuntimeErrorKind> {
    let (a, b) = integers(symbol, lv, rv)?;
    Ok(Value::Boolean(op(a, b)))
}

fn equality(symbol: &str, lv: &Value, rv: &Value) -> Result<bool, RuntimeErrorKind> {
    match (lv, rv) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        (Value::String(a), Value::String(b)) => Ok(a == b),
        _ => Err(binary_mismatch(symbol, lv, rv)),
    }
}

fn logical(
    symbol: &str,
    lv: &Value,
    rv: &Value,
    op: fn(bool, bool) -> bool,
) -> Result<Value, RuntimeErrorKind> {
    match (lv, rv) {
        (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(op(*a, *b))),
        _ => Err(binary_mismatch(symbol, lv, rv)),
    }
}

fn integers(symbol: &str, lv: &Value, rv: &Value) -> Result<(i64, i64), RuntimeErrorKind> {
    match (lv, rv) {
        (Value::Integer(a), Value::Integer(b)) => Ok((*a, *b)),
        _ => Err(binary_mismatch(symbol, lv, rv)),
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

fn binary_mismatch(symbol: &str, lv: &Value, rv: &Value) -> RuntimeErrorKind {
    RuntimeErrorKind::TypeMismatch {
        op: symbol.to_string(),
        operands: format!("{} and {}", lv.describe(), rv.describe()),
    }
}

fn unary_mismatch(symbol: &str, operand: &Value) -> RuntimeErrorKind {
    RuntimeErrorKind::TypeMismatch {
        op: symbol.to_string(),
        operands: operand.describe(),
    }
}

fn overflow(symbol: &str) -> RuntimeErrorKind {
    RuntimeErrorKind::Overflow {
        op: symbol.to_string(),
    }
}
