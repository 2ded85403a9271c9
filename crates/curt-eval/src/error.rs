//! Runtime error types for the Curt interpreter.

use curt_types::{CurtError, ErrorCode, SourceFile, Span};
use thiserror::Error;

/// What went wrong while evaluating.
///
/// Operators and natives produce these without position information; the
/// interpreter pairs them with the span of the node being evaluated to make
/// a [`RuntimeError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    /// An operator was applied to operands outside its type row.
    #[error("Operator '{op}' cannot be applied to {operands}.")]
    TypeMismatch { op: String, operands: String },

    /// A native function received an argument of the wrong type.
    #[error("Argument {position} of '{function}' must be {expected}, got {found}.")]
    ArgumentType {
        function: String,
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("'{function}' expects {expected} argument(s) but got {found}.")]
    WrongArgCount {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Modulo by zero.")]
    ModuloByZero,

    #[error("Integer overflow in '{op}'.")]
    Overflow { op: String },

    #[error("Undefined identifier '{0}'.")]
    UndefinedIdentifier(String),

    #[error("Undefined function '{0}'.")]
    UndefinedFunction(String),

    /// The callee name is bound, but not to a function.
    #[error("'{name}' is {found}, which is not callable.")]
    NotCallable { name: String, found: String },

    /// An argument is the right type but outside the accepted range.
    #[error("{0}")]
    OutOfRange(String),

    #[error("Condition must be a boolean, got {0}.")]
    ConditionNotBoolean(String),

    #[error("Call depth exceeded the limit of {0}.")]
    CallDepthExceeded(usize),

    #[error("Console I/O failed: {0}")]
    ConsoleIo(String),
}

impl RuntimeErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::ArgumentType { .. } => ErrorCode::ARGUMENT_TYPE,
            Self::WrongArgCount { .. } => ErrorCode::WRONG_ARG_COUNT,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCode::DIVISION_BY_ZERO,
            Self::Overflow { .. } => ErrorCode::INTEGER_OVERFLOW,
            Self::UndefinedIdentifier(_) => ErrorCode::UNDEFINED_IDENTIFIER,
            Self::UndefinedFunction(_) => ErrorCode::UNDEFINED_FUNCTION,
            Self::NotCallable { .. } => ErrorCode::NOT_CALLABLE,
            Self::OutOfRange(_) => ErrorCode::OUT_OF_RANGE,
            Self::ConditionNotBoolean(_) => ErrorCode::CONDITION_NOT_BOOLEAN,
            Self::CallDepthExceeded(_) => ErrorCode::CALL_DEPTH_EXCEEDED,
            Self::ConsoleIo(_) => ErrorCode::CONSOLE_IO,
        }
    }

    pub fn at(self, span: Span) -> RuntimeError {
        RuntimeError { kind: self, span }
    }
}

impl From<std::io::Error> for RuntimeErrorKind {
    fn from(err: std::io::Error) -> Self {
        Self::ConsoleIo(err.to_string())
    }
}

/// A runtime failure tied to the source position that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Convert to a diagnostic with the `runtime` location tag, attaching
    /// the offending source line.
    pub fn to_diagnostic(&self, source_file: &SourceFile) -> CurtError {
        let source_line = source_file.line(self.span.line).unwrap_or("");
        CurtError::new(
            &source_file.name,
            self.code(),
            self.kind.to_string(),
            self.span,
            "runtime",
        )
        .with_source_line(source_line)
    }
}

/// Result alias for interpreter operations.
pub type EvalResult<T> = Result<T, RuntimeError>;
