//! Shared types for the Curt interpreter.
//!
//! Source spans, diagnostics, and the AST produced by the parser and walked
//! by the evaluator.

pub mod ast;
mod error;
mod span;

pub use error::{CurtError, Diagnostics, ErrorCategory, ErrorCode};
pub use span::{SourceFile, Span};
