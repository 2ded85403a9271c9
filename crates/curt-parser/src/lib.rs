//! Curt parser: converts a token stream into an AST by recursive descent.

mod parse_expr;
mod parse_stmt;
mod parser;

pub use parser::{ParseResult, Parser, MAX_NESTING, MAX_OPERATOR_CHAIN};
