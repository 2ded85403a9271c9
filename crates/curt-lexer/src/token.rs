//! Token types for the Curt scanner.

use curt_types::Span;
use std::fmt;

/// The 17 reserved words. None of them can be used as a name.
pub const KEYWORDS: &[&str] = &[
    // Statements
    "make", "if", "elif", "else", "while", "for", "func", "return", "show",
    // Expressions
    "ask", "randint", "call", "true", "false", "and", "or", "not",
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// One lexical unit. Immutable once the scanner has produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Kind, including the literal payload for numbers and strings.
    pub kind: TokenKind,
    /// The exact source text of the token (empty for end of input).
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}' (line {})", self.kind, self.lexeme, self.span.line)
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // ── Literals ─────────────────────────────────────────────

    /// `42`
    Number(i64),
    /// `"text"`, escapes already resolved
    String(String),
    /// `count`, `add_one`
    Identifier(String),

    // ── Keywords ─────────────────────────────────────────────

    Make,
    If,
    Elif,
    Else,
    While,
    For,
    Func,
    Return,
    Show,
    Ask,
    Randint,
    Call,
    True,
    False,
    And,
    Or,
    Not,

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `=`
    Eq,

    // ── Punctuation ──────────────────────────────────────────

    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    /// End of input. Every token stream ends with exactly one.
    Eof,
}

impl TokenKind {
    /// Map a word to its keyword kind, or `None` for ordinary names.
    pub fn from_keyword(word: &str) -> Option<TokenKind> {
        Some(match word {
            "make" => TokenKind::Make,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "show" => TokenKind::Show,
            "ask" => TokenKind::Ask,
            "randint" => TokenKind::Randint,
            "call" => TokenKind::Call,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ => return None,
        })
    }

    #[cfg(test)]
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Make
                | TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Func
                | TokenKind::Return
                | TokenKind::Show
                | TokenKind::Ask
                | TokenKind::Randint
                | TokenKind::Call
                | TokenKind::True
                | TokenKind::False
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::String(s) => write!(f, "\"{s}\""),
            TokenKind::Identifier(name) => f.write_str(name),
            TokenKind::Make => f.write_str("make"),
            TokenKind::If => f.write_str("if"),
            TokenKind::Elif => f.write_str("elif"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::While => f.write_str("while"),
            TokenKind::For => f.write_str("for"),
            TokenKind::Func => f.write_str("func"),
            TokenKind::Return => f.write_str("return"),
            TokenKind::Show => f.write_str("show"),
            TokenKind::Ask => f.write_str("ask"),
            TokenKind::Randint => f.write_str("randint"),
            TokenKind::Call => f.write_str("call"),
            TokenKind::True => f.write_str("true"),
            TokenKind::False => f.write_str("false"),
            TokenKind::And => f.write_str("and"),
            TokenKind::Or => f.write_str("or"),
            TokenKind::Not => f.write_str("not"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::PlusPlus => f.write_str("++"),
            TokenKind::MinusMinus => f.write_str("--"),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::Less => f.write_str("<"),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::Eq => f.write_str("="),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}
