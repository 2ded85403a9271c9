//! Runtime values.

use crate::natives::NativeFn;
use curt_types::ast::Block;
use std::fmt;
use std::rc::Rc;

/// A value produced by evaluating an expression.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    String(String),
    Boolean(bool),
    /// Result of `show` and of a function body that finishes without `return`.
    Null,
    /// A `func` definition.
    Function(Rc<UserFunction>),
    /// A host-provided function from the native table.
    Native(&'static NativeFn),
}

/// A user-defined function: name, parameter names, and body.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Function(_) => "function",
            Value::Native(_) => "native function",
        }
    }

    /// Type and value together, as used in error messages: `integer 5`,
    /// `string "hi"`, `null`.
    pub fn describe(&self) -> String {
        match self {
            Value::Integer(n) => format!("integer {n}"),
            Value::String(s) => format!("string {s:?}"),
            Value::Boolean(b) => format!("boolean {b}"),
            Value::Null => "null".to_string(),
            Value::Function(f) => format!("function {}", f.name),
            Value::Native(n) => format!("native function {}", n.name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// The text `show` prints.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Function(func) => write!(f, "<func {}>", func.name),
            Value::Native(native) => write!(f, "<native {}>", native.name),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
