//! Curt interpreter: orchestrates the full pipeline.
//!
//! ```text
//! Curt Source → Lexer → Parser → Interpreter
//! ```
//!
//! The three stages are exposed separately ([`scan`], [`parse`],
//! [`interpret`]) for hosts that drive them one at a time, and together as
//! [`run_source`]. A stage that reports errors stops the pipeline: tokens
//! with syntax errors are never parsed, and a program with parse errors is
//! never run. A runtime error stops the run at the failing statement.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

pub use curt_eval::{
    BufferConsole, Console, EvalConfig, Interpreter, RuntimeError, RuntimeErrorKind, StdConsole,
    Value,
};
pub use curt_lexer::{LexResult, Token, TokenKind};
pub use curt_parser::ParseResult;
pub use curt_types::ast::Program;
pub use curt_types::{CurtError, Diagnostics, ErrorCategory, ErrorCode, SourceFile, Span};

/// The pipeline stage that produced a run's errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Scan,
    Parse,
    Runtime,
}

/// Outcome of [`run_source`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Whether every stage completed without errors.
    pub success: bool,
    /// The stage that stopped the pipeline, if any.
    pub failed_stage: Option<Stage>,
    /// Diagnostics from the failing stage.
    pub errors: Diagnostics,
}

impl RunResult {
    fn completed() -> Self {
        Self {
            success: true,
            failed_stage: None,
            errors: Diagnostics::empty(),
        }
    }

    fn failed(stage: Stage, errors: Diagnostics) -> Self {
        Self {
            success: false,
            failed_stage: Some(stage),
            errors,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Scan source text into tokens, collecting syntax errors.
pub fn scan(source_file: &SourceFile) -> LexResult {
    curt_lexer::Lexer::new(source_file).lex()
}

/// Parse tokens into a program, collecting parse errors.
///
/// When the result has errors its program is incomplete and must not be
/// passed to [`interpret`].
pub fn parse(tokens: Vec<Token>, source_file: &SourceFile) -> ParseResult {
    curt_parser::Parser::new(tokens, source_file).parse()
}

/// Run a program on `interpreter`, stopping at the first runtime error.
pub fn interpret<C: Console>(
    program: &Program,
    interpreter: &mut Interpreter<C>,
) -> Result<(), RuntimeError> {
    interpreter.interpret(program)
}

/// Scan and parse without running, returning every diagnostic found.
///
/// Parsing is skipped when scanning fails.
pub fn check(source: &str, filename: &str) -> Diagnostics {
    let source_file = SourceFile::new(filename, source);
    let lexed = scan(&source_file);
    if lexed.had_errors() {
        return lexed.errors;
    }
    parse(lexed.tokens, &source_file).errors
}

/// Scan, parse and run `source` on `interpreter`.
///
/// Bindings made by the run stay in the interpreter, so a REPL can call this
/// once per input line.
pub fn run_source<C: Console>(
    source: &str,
    filename: &str,
    interpreter: &mut Interpreter<C>,
) -> RunResult {
    let source_file = SourceFile::new(filename, source);

    let lexed = scan(&source_file);
    if lexed.had_errors() {
        return RunResult::failed(Stage::Scan, lexed.errors);
    }

    let parsed = parse(lexed.tokens, &source_file);
    if parsed.had_errors() {
        return RunResult::failed(Stage::Parse, parsed.errors);
    }

    match interpret(&parsed.program, interpreter) {
        Ok(()) => RunResult::completed(),
        Err(err) => {
            let mut errors = Diagnostics::empty();
            errors.push(err.to_diagnostic(&source_file));
            RunResult::failed(Stage::Runtime, errors)
        }
    }
}

/// Write each diagnostic as `Line <n> Error [<where>]: <message>`, one per line.
pub fn report(diagnostics: &Diagnostics, out: &mut impl Write) -> io::Result<()> {
    for error in diagnostics.iter() {
        writeln!(out, "{error}")?;
    }
    Ok(())
}

/// The interpreter version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
