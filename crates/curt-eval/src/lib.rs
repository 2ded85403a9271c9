//! Curt tree-walking interpreter.
//!
//! Executes a parsed [`Program`](curt_types::ast::Program) statement by
//! statement against one flat, run-wide environment. Operators are looked up
//! in the [`ops`] dispatch tables at evaluation time; host functions live in
//! the [`natives`] table; all console traffic goes through [`Console`].

pub mod config;
pub mod console;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod natives;
pub mod ops;
pub mod value;

pub use config::EvalConfig;
pub use console::{BufferConsole, Console, StdConsole};
pub use env::Environment;
pub use error::{EvalResult, RuntimeError, RuntimeErrorKind};
pub use evaluator::{ExecResult, Interpreter};
pub use natives::{NativeFn, NativeHost, ParamType};
pub use value::{UserFunction, Value};
