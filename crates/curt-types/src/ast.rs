//! AST node types for the Curt language.
//!
//! Every node carries a [`Span`] so runtime errors can report a line.
//! Operator nodes only record which operator they use; the evaluator picks
//! the operation from its dispatch table when the node is evaluated.

use crate::Span;
use std::fmt;

/// A parsed program: the top-level statement list, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// A spanned name.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assignment(Assignment),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Block(Block),
    Show(ShowStmt),
    FunctionDef(FunctionDef),
    Return(ReturnStmt),
    /// A bare expression evaluated for its effects.
    Expr(ExprStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assignment(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Block(s) => s.span,
            Stmt::Show(s) => s.span,
            Stmt::FunctionDef(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Expr(s) => s.span,
        }
    }
}

/// `make name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// `if (c) { } elif (c) { } else { }`
///
/// `branches[0]` is the `if` arm; any further entries are `elif` arms in
/// written order.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub branches: Vec<CondBranch>,
    pub else_block: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondBranch {
    pub condition: Expr,
    pub block: Block,
}

/// `while (c) { }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

/// `for (make i = 0; stop; step) { }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub start: Assignment,
    pub stop: Expr,
    pub step: Expr,
    pub body: Block,
    pub span: Span,
}

/// `{ stmts... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// `show(expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct ShowStmt {
    pub value: Expr,
    pub span: Span,
}

/// `func name(a, b) { }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Block,
    pub span: Span,
}

/// `return expr`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The variable a Step operator writes back to, looking through parentheses.
    pub fn assignable_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Literal(Literal::Identifier(name)) => Some(name),
            ExprKind::Grouping(inner) => inner.assignable_name(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `-x`, `not x`
    Negation {
        op: NegationOp,
        operand: Box<Expr>,
    },
    /// `++x`, `--x`
    Step {
        op: StepOp,
        operand: Box<Expr>,
    },
    /// `a < b`, `a == b`, `a and b`, ...
    Comparison {
        left: Box<Expr>,
        op: ComparisonOp,
        right: Box<Expr>,
    },
    /// `a + b`, `a % b`, ...
    Arithmetic {
        left: Box<Expr>,
        op: ArithmeticOp,
        right: Box<Expr>,
    },
    Literal(Literal),
    /// `(expr)`
    Grouping(Box<Expr>),
    /// `ask(prompt)`
    Ask(Box<Expr>),
    /// `randint(bound)`
    Randint(Box<Expr>),
    /// `call name(args...)`
    Call { callee: Ident, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(i64),
    String(String),
    Boolean(bool),
    Identifier(String),
}

// ── Operators ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegationOp {
    /// Arithmetic `-`
    Minus,
    /// Logical `not`
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOp {
    Increment,
    Decrement,
}

/// Everything at the comparison precedence level, logical connectives included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl fmt::Display for NegationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minus => "-",
            Self::Not => "not",
        })
    }
}

impl fmt::Display for StepOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        })
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "and",
            Self::Or => "or",
        })
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        })
    }
}
