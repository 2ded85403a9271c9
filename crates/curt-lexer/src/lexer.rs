//! Core Curt scanner: converts source text to a token stream.
//!
//! - Whitespace (newlines included) only separates tokens and advances the
//!   line counter; statements need no terminator.
//! - `//` comments run to the end of the line.
//! - An illegal character is reported, skipped, and scanning carries on, so
//!   one pass surfaces every lexical error in the input.

use curt_types::{CurtError, Diagnostics, ErrorCode, SourceFile, Span};

use crate::token::{Token, TokenKind};

/// The Curt scanner.
pub struct Lexer<'src> {
    chars: Vec<char>,
    source_file: &'src SourceFile,
    /// Index into `chars`.
    pos: usize,
    /// Current line (1-based).
    line: u32,
    /// Current column (1-based).
    col: u32,
    errors: Diagnostics,
}

/// Result of scanning: tokens plus any syntax errors.
pub struct LexResult {
    /// Always ends with [`TokenKind::Eof`], even when errors occurred.
    pub tokens: Vec<Token>,
    pub errors: Diagnostics,
}

impl LexResult {
    /// `true` when the token stream must not be handed to the parser.
    pub fn had_errors(&self) -> bool {
        self.errors.has_errors()
    }
}

impl<'src> Lexer<'src> {
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            chars: source_file.source.chars().collect(),
            source_file,
            pos: 0,
            line: 1,
            col: 1,
            errors: Diagnostics::empty(),
        }
    }

    /// Scan the whole source.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            if self.at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_span()));
                break;
            }
            if let Some(token) = self.scan_token() {
                tokens.push(token);
            }
        }
        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume the next character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(start_line, start_col, self.line, self.col.saturating_sub(1).max(1))
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<String>, span: Span, text: &str) {
        let source_line = self.source_file.line(span.line).unwrap_or("");
        let err = CurtError::new(
            &self.source_file.name,
            code,
            message,
            span,
            format!("at '{text}'"),
        )
        .with_source_line(source_line);
        self.errors.push(err);
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.advance();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Token scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token. Returns `None` when the input at this point was
    /// illegal; the error has been recorded and the bad text skipped.
    fn scan_token(&mut self) -> Option<Token> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        let ch = self.advance()?;

        let kind = match ch {
            '"' => return self.scan_string(start, start_line, start_col),
            '0'..='9' => return self.scan_number(start, start_line, start_col),
            c if c.is_ascii_alphabetic() || c == '_' => {
                return Some(self.scan_identifier(start, start_line, start_col))
            }

            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else {
                    TokenKind::Minus
                }
            }
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' if self.eat('=') => TokenKind::BangEq,
            '>' => {
                if self.eat('=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,

            other => {
                let span = self.span_from(start_line, start_col);
                self.emit_error(
                    ErrorCode::UNEXPECTED_CHARACTER,
                    format!("Unexpected character '{other}'"),
                    span,
                    &other.to_string(),
                );
                return None;
            }
        };

        Some(Token::new(
            kind,
            self.text_from(start),
            self.span_from(start_line, start_col),
        ))
    }

    fn scan_number(&mut self, start: usize, start_line: u32, start_col: u32) -> Option<Token> {
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        let text = self.text_from(start);
        let span = self.span_from(start_line, start_col);
        match text.parse::<i64>() {
            Ok(value) => Some(Token::new(TokenKind::Number(value), text, span)),
            Err(_) => {
                self.emit_error(
                    ErrorCode::NUMBER_OUT_OF_RANGE,
                    format!("Number literal {text} does not fit in a 64-bit integer"),
                    span,
                    &text,
                );
                None
            }
        }
    }

    fn scan_identifier(&mut self, start: usize, start_line: u32, start_col: u32) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let text = self.text_from(start);
        let kind =
            TokenKind::from_keyword(&text).unwrap_or_else(|| TokenKind::Identifier(text.clone()));
        Token::new(kind, text, self.span_from(start_line, start_col))
    }

    /// Scan a string literal; the opening `"` is already consumed.
    fn scan_string(&mut self, start: usize, start_line: u32, start_col: u32) -> Option<Token> {
        let mut value = String::new();
        let mut valid = true;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    let span = self.span_from(start_line, start_col);
                    let text = self.text_from(start);
                    self.emit_error(
                        ErrorCode::UNTERMINATED_STRING,
                        "Unterminated string literal",
                        span,
                        &text,
                    );
                    return None;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    valid &= self.scan_escape(&mut value);
                }
                Some(ch) => {
                    self.advance();
                    value.push(ch);
                }
            }
        }
        let span = self.span_from(start_line, start_col);
        valid.then(|| Token::new(TokenKind::String(value), self.text_from(start), span))
    }

    /// Resolve one escape sequence into `buf`. Returns `false` if it was invalid.
    fn scan_escape(&mut self, buf: &mut String) -> bool {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        self.advance(); // `\`
        let resolved = match self.peek() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('n') => '\n',
            Some('t') => '\t',
            // End of line or input: leave it for the unterminated-string check.
            None | Some('\n') => return true,
            Some(other) => {
                self.advance();
                let span = self.span_from(start_line, start_col);
                let text = self.text_from(start);
                self.emit_error(
                    ErrorCode::INVALID_ESCAPE,
                    format!("Invalid escape sequence '\\{other}'"),
                    span,
                    &text,
                );
                return false;
            }
        };
        self.advance();
        buf.push(resolved);
        true
    }
}
