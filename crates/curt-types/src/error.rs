use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Illegal input found by the scanner.
    Syntax,
    /// Grammar violation found by the parser.
    Parse,
    /// Failure raised while evaluating.
    Runtime,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => f.write_str("syntax"),
            Self::Parse => f.write_str("parse"),
            Self::Runtime => f.write_str("runtime"),
        }
    }
}

/// Numeric diagnostic code. The hundreds digit selects the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax (E100–E199) ──
    pub const UNEXPECTED_CHARACTER: Self = Self(100);
    pub const UNTERMINATED_STRING: Self = Self(101);
    pub const INVALID_ESCAPE: Self = Self(102);
    pub const NUMBER_OUT_OF_RANGE: Self = Self(103);

    // ── Parse (E200–E299) ──
    pub const UNEXPECTED_TOKEN: Self = Self(200);
    pub const RETURN_OUTSIDE_FUNCTION: Self = Self(201);
    pub const NESTING_TOO_DEEP: Self = Self(202);

    // ── Runtime (E300–E399) ──
    pub const TYPE_MISMATCH: Self = Self(300);
    pub const ARGUMENT_TYPE: Self = Self(301);
    pub const WRONG_ARG_COUNT: Self = Self(302);
    pub const DIVISION_BY_ZERO: Self = Self(303);
    pub const INTEGER_OVERFLOW: Self = Self(304);
    pub const UNDEFINED_IDENTIFIER: Self = Self(305);
    pub const UNDEFINED_FUNCTION: Self = Self(306);
    pub const NOT_CALLABLE: Self = Self(307);
    pub const OUT_OF_RANGE: Self = Self(308);
    pub const CONDITION_NOT_BOOLEAN: Self = Self(309);
    pub const CALL_DEPTH_EXCEEDED: Self = Self(310);
    pub const CONSOLE_IO: Self = Self(311);

    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Parse,
            300..=399 => ErrorCategory::Runtime,
            _ => ErrorCategory::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A single diagnostic, whatever stage raised it.
///
/// Renders as `Line <n> Error [<where>]: <message>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurtError {
    pub file: String,
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// Where the error sits: `at 'x'`, `at end`, or `runtime`.
    pub location: String,
    pub source_line: String,
}

impl CurtError {
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        location: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            category: code.category(),
            message: message.into(),
            span,
            location: location.into(),
            source_line: String::new(),
        }
    }

    /// Attach the text of the line the error points into.
    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = line.into();
        self
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }
}

impl fmt::Display for CurtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {} Error [{}]: {}",
            self.span.line, self.location, self.message
        )
    }
}

impl std::error::Error for CurtError {}

/// Errors accumulated by one pipeline stage.
///
/// Scanning and parsing keep going after an error so that one pass reports
/// as much as possible; a non-empty accumulator blocks the next stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<CurtError>,
    pub total_errors: usize,
}

impl Diagnostics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn push(&mut self, error: CurtError) {
        self.errors.push(error);
        self.total_errors += 1;
    }

    /// Append everything from another stage.
    pub fn extend(&mut self, other: Diagnostics) {
        for err in other.errors {
            self.push(err);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurtError> {
        self.errors.iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
