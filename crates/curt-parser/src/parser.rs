//! Core parser infrastructure: token cursor, error reporting, recovery.

use curt_lexer::token::{Token, TokenKind};
use curt_types::ast::{Ident, Program};
use curt_types::{CurtError, Diagnostics, ErrorCode, SourceFile, Span};

/// Deepest nesting of blocks, groupings, prefix operators and call arguments
/// the parser accepts.
pub const MAX_NESTING: u32 = 200;

/// Most binary operators the parser accepts in one expression, counting the
/// chains of every enclosing expression.
pub const MAX_OPERATOR_CHAIN: u32 = 1_000;

/// The Curt parser.
///
/// Single-token lookahead over the scanner's output. On an unexpected token
/// it records an error, skips that one token, and carries on so a single
/// pass can report several problems.
pub struct Parser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source_file: &'src SourceFile,
    errors: Diagnostics,
    /// How many `func` bodies enclose the current position.
    pub(crate) function_depth: u32,
    pub(crate) nesting: u32,
    pub(crate) chain: u32,
}

/// Result of parsing.
///
/// `program` holds whatever could be built. When `errors` is non-empty the
/// program is incomplete and must not be interpreted.
pub struct ParseResult {
    pub program: Program,
    pub errors: Diagnostics,
}

impl ParseResult {
    pub fn had_errors(&self) -> bool {
        self.errors.has_errors()
    }
}

impl<'src> Parser<'src> {
    pub fn new(mut tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let span = tokens.last().map(|t| t.span).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", span));
        }
        Self {
            tokens,
            pos: 0,
            source_file,
            errors: Diagnostics::empty(),
            function_depth: 0,
            nesting: 0,
            chain: 0,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    pub(crate) fn peek(&self) -> &Token {
        // `new` guarantees a trailing Eof and `advance` never steps past it.
        &self.tokens[self.pos]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Consume the current token. Never moves past Eof.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => self.current_span(),
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Consume a token of the given kind or report `message` at the current token.
    pub(crate) fn expect(&mut self, kind: &TokenKind, message: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, message);
            None
        }
    }

    pub(crate) fn expect_identifier(&mut self, message: &str) -> Option<Ident> {
        match self.peek_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let span = self.advance().span;
                Some(Ident::new(name, span))
            }
            _ => {
                self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, message);
                None
            }
        }
    }

    /// Like [`expect_identifier`](Self::expect_identifier), but also accepts
    /// the keyword-named natives `show` and `ask` as call targets.
    pub(crate) fn expect_callee(&mut self) -> Option<Ident> {
        match self.peek_kind() {
            TokenKind::Show | TokenKind::Ask => {
                let token = self.advance();
                Some(Ident::new(token.lexeme, token.span))
            }
            _ => self.expect_identifier("Expected function name after 'call'."),
        }
    }

    // ── Nesting Guard ─────────────────────────────────────────────────────────

    /// Enter one level of nesting. Reports and returns `false` past [`MAX_NESTING`].
    pub(crate) fn enter_nesting(&mut self) -> bool {
        if self.nesting >= MAX_NESTING {
            self.error_at_current(
                ErrorCode::NESTING_TOO_DEEP,
                format!("Nesting deeper than {MAX_NESTING} levels."),
            );
            return false;
        }
        self.nesting += 1;
        true
    }

    pub(crate) fn exit_nesting(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Count one more binary operator against [`MAX_OPERATOR_CHAIN`].
    pub(crate) fn extend_chain(&mut self, links: &mut u32) -> bool {
        if self.chain >= MAX_OPERATOR_CHAIN {
            self.error_at_current(
                ErrorCode::NESTING_TOO_DEEP,
                format!("Expression has more than {MAX_OPERATOR_CHAIN} operators."),
            );
            return false;
        }
        self.chain += 1;
        *links += 1;
        true
    }

    pub(crate) fn release_chain(&mut self, links: u32) {
        self.chain = self.chain.saturating_sub(links);
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    pub(crate) fn error_at_current(&mut self, code: ErrorCode, message: impl Into<String>) {
        let token = self.peek().clone();
        self.error_at(&token, code, message);
    }

    /// Report an error tagged with the offending token's line and text.
    pub(crate) fn error_at(&mut self, token: &Token, code: ErrorCode, message: impl Into<String>) {
        let location = if token.kind == TokenKind::Eof {
            "at end".to_string()
        } else {
            format!("at '{}'", token.lexeme)
        };
        let source_line = self.source_file.line(token.span.line).unwrap_or("");
        let error = CurtError::new(&self.source_file.name, code, message, token.span, location)
            .with_source_line(source_line);
        self.errors.push(error);
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// `program -> statement* EOF`
    pub fn parse(mut self) -> ParseResult {
        let mut stmts = Vec::new();
        while !self.at_end() {
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => {
                    self.advance();
                }
            }
        }
        ParseResult {
            program: Program { stmts },
            errors: self.errors,
        }
    }
}
