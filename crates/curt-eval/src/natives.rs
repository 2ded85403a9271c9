//! The native function table.
//!
//! Every entry is bound into the environment before the first user
//! statement runs. Natives are ordinary bindings: a program may overwrite
//! any of them with `make` or `func`.

use crate::env::Environment;
use crate::error::RuntimeErrorKind;
use crate::value::Value;

/// What a native may do to the running interpreter.
pub trait NativeHost {
    fn write(&mut self, text: &str) -> Result<(), RuntimeErrorKind>;

    fn write_line(&mut self, text: &str) -> Result<(), RuntimeErrorKind>;

    fn read_line(&mut self) -> Result<String, RuntimeErrorKind>;

    /// Uniform integer in `[0, bound)`. A bound below 1 is out of range.
    fn random_below(&mut self, bound: i64) -> Result<i64, RuntimeErrorKind>;

    /// Every bound name, sorted.
    fn bound_names(&self) -> Vec<String>;
}

/// Declared type of a native parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    String,
    Any,
}

impl ParamType {
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ParamType::Integer => matches!(value, Value::Integer(_)),
            ParamType::String => matches!(value, Value::String(_)),
            ParamType::Any => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamType::Integer => "an integer",
            ParamType::String => "a string",
            ParamType::Any => "any value",
        }
    }
}

pub type NativeImpl = fn(&mut dyn NativeHost, &[Value]) -> Result<Value, RuntimeErrorKind>;

/// A host-provided function with a fixed signature.
#[derive(Debug)]
pub struct NativeFn {
    pub name: &'static str,
    pub params: &'static [ParamType],
    func: NativeImpl,
}

impl NativeFn {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Check argument count and types, then run the function.
    pub fn invoke(
        &self,
        host: &mut dyn NativeHost,
        args: &[Value],
    ) -> Result<Value, RuntimeErrorKind> {
        if args.len() != self.arity() {
            return Err(RuntimeErrorKind::WrongArgCount {
                function: self.name.to_string(),
                expected: self.arity(),
                found: args.len(),
            });
        }
        for (position, (param, arg)) in self.params.iter().zip(args).enumerate() {
            if !param.accepts(arg) {
                return Err(RuntimeErrorKind::ArgumentType {
                    function: self.name.to_string(),
                    position: position + 1,
                    expected: param.name(),
                    found: arg.describe(),
                });
            }
        }
        (self.func)(host, args)
    }
}

pub static NATIVES: [NativeFn; 8] = [
    NativeFn {
        name: "ascii",
        params: &[ParamType::String],
        func: native_ascii,
    },
    NativeFn {
        name: "abs",
        params: &[ParamType::Integer],
        func: native_abs,
    },
    NativeFn {
        name: "ask",
        params: &[ParamType::String],
        func: native_ask,
    },
    NativeFn {
        name: "pow",
        params: &[ParamType::Integer, ParamType::Integer],
        func: native_pow,
    },
    NativeFn {
        name: "rand",
        params: &[ParamType::Integer],
        func: native_rand,
    },
    NativeFn {
        name: "show",
        params: &[ParamType::Any],
        func: native_show,
    },
    NativeFn {
        name: "sqrt",
        params: &[ParamType::Integer],
        func: native_sqrt,
    },
    NativeFn {
        name: "locals",
        params: &[],
        func: native_locals,
    },
];

/// The string `locals()` returns after printing.
pub const LOCALS_RESULT: &str = "locals";

/// Bind every native into `env`.
pub fn install(env: &mut Environment) {
    for native in &NATIVES {
        env.define(native.name, Value::Native(native));
    }
}

#[cfg(test)]
fn lookup(name: &str) -> Option<&'static NativeFn> {
    NATIVES.iter().find(|n| n.name == name)
}

// ── Argument access ───────────────────────────────────────────────────────────
// `invoke` has already checked count and types.

fn int_arg(args: &[Value], index: usize) -> i64 {
    match args.get(index) {
        Some(Value::Integer(n)) => *n,
        _ => 0,
    }
}

fn str_arg(args: &[Value], index: usize) -> &str {
    match args.get(index) {
        Some(Value::String(s)) => s,
        _ => "",
    }
}

// ── Implementations ───────────────────────────────────────────────────────────

fn native_ascii(_: &mut dyn NativeHost, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    let text = str_arg(args, 0);
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Value::Integer(i64::from(u32::from(ch)))),
        _ => Err(RuntimeErrorKind::OutOfRange(format!(
            "'ascii' expects a single character, got {text:?}."
        ))),
    }
}

fn native_abs(_: &mut dyn NativeHost, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    int_arg(args, 0)
        .checked_abs()
        .map(Value::Integer)
        .ok_or_else(|| RuntimeErrorKind::Overflow { op: "abs".into() })
}

fn native_ask(host: &mut dyn NativeHost, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    host.write(str_arg(args, 0))?;
    host.read_line().map(Value::String)
}

fn native_pow(_: &mut dyn NativeHost, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    let base = int_arg(args, 0);
    let exp = int_arg(args, 1);
    if exp < 0 {
        return Err(RuntimeErrorKind::OutOfRange(format!(
            "'pow' needs a non-negative exponent, got {exp}."
        )));
    }
    u32::try_from(exp)
        .ok()
        .and_then(|exp| base.checked_pow(exp))
        .map(Value::Integer)
        .ok_or_else(|| RuntimeErrorKind::Overflow { op: "pow".into() })
}

fn native_rand(host: &mut dyn NativeHost, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    host.random_below(int_arg(args, 0)).map(Value::Integer)
}

fn native_show(host: &mut dyn NativeHost, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    if let Some(value) = args.first() {
        host.write_line(&value.to_string())?;
    }
    Ok(Value::Null)
}

fn native_sqrt(_: &mut dyn NativeHost, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    let n = int_arg(args, 0);
    if n < 0 {
        return Err(RuntimeErrorKind::OutOfRange(format!(
            "'sqrt' needs a non-negative argument, got {n}."
        )));
    }
    Ok(Value::Integer(floor_sqrt(n)))
}

fn native_locals(host: &mut dyn NativeHost, _: &[Value]) -> Result<Value, RuntimeErrorKind> {
    for name in host.bound_names() {
        host.write_line(&name)?;
    }
    Ok(Value::String(LOCALS_RESULT.to_string()))
}

/// Largest `r` with `r * r <= n`, for `n >= 0`.
fn floor_sqrt(n: i64) -> i64 {
    // The float estimate can be off by one either way near the top of the range.
    let mut r = (n as f64).sqrt() as i64;
    while r.checked_mul(r).is_none_or(|sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}
