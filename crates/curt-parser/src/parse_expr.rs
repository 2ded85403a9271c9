//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! | Level      | Operators                              | Assoc  |
//! |------------|----------------------------------------|--------|
//! | comparison | `< <= > >= == != and or`               | left   |
//! | arithmetic | `+ - * / %`                            | left   |
//! | unary      | `not -` (negation), `++ --` (step)     | prefix |
//! | primary    | `call f(...)`, literals, `ask`, `(...)`|        |

use crate::parser::Parser;
use curt_lexer::token::TokenKind;
use curt_types::ast::*;
use curt_types::{ErrorCode, Span};

impl<'src> Parser<'src> {
    /// `expression -> comparison`
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        self.parse_comparison()
    }

    /// `comparison -> arithmetic (compOp arithmetic)*`
    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut left = self.parse_arithmetic()?;
        let mut links = 0;
        let result = loop {
            let Some(op) = comparison_op(self.peek_kind()) else {
                break Some(left);
            };
            if !self.extend_chain(&mut links) {
                break None;
            }
            self.advance();
            let Some(right) = self.parse_arithmetic() else {
                break None;
            };
            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Comparison {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        };
        self.release_chain(links);
        result
    }

    /// `arithmetic -> unary (arithOp unary)*`
    fn parse_arithmetic(&mut self) -> Option<Expr> {
        let mut left = self.parse_unary()?;
        let mut links = 0;
        let result = loop {
            let Some(op) = arithmetic_op(self.peek_kind()) else {
                break Some(left);
            };
            if !self.extend_chain(&mut links) {
                break None;
            }
            self.advance();
            let Some(right) = self.parse_unary() else {
                break None;
            };
            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Arithmetic {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        };
        self.release_chain(links);
        result
    }

    /// ```text
    /// unary -> ("not" | "-") unary
    ///        | ("++" | "--") unary
    ///        | primary
    /// ```
    fn parse_unary(&mut self) -> Option<Expr> {
        let build: fn(Box<Expr>) -> ExprKind = match self.peek_kind() {
            TokenKind::Not => |operand| ExprKind::Negation { op: NegationOp::Not, operand },
            TokenKind::Minus => |operand| ExprKind::Negation { op: NegationOp::Minus, operand },
            TokenKind::PlusPlus => |operand| ExprKind::Step { op: StepOp::Increment, operand },
            TokenKind::MinusMinus => |operand| ExprKind::Step { op: StepOp::Decrement, operand },
            _ => return self.parse_primary(),
        };

        let start = self.advance().span;
        if !self.enter_nesting() {
            return None;
        }
        let operand = self.parse_unary();
        self.exit_nesting();
        let operand = operand?;
        let span = start.to(operand.span);
        Some(Expr::new(build(Box::new(operand)), span))
    }

    /// `primary -> "call" IDENTIFIER "(" args? ")" | literal`
    fn parse_primary(&mut self) -> Option<Expr> {
        if self.check(&TokenKind::Call) {
            self.parse_call()
        } else {
            self.parse_literal()
        }
    }

    fn parse_call(&mut self) -> Option<Expr> {
        let start = self.advance().span; // `call`
        let callee = self.expect_callee()?;
        self.expect(&TokenKind::LParen, "Expected '(' after function name.")?;
        if !self.enter_nesting() {
            return None;
        }
        let args = self.parse_arguments();
        self.exit_nesting();
        let args = args?;
        self.expect(&TokenKind::RParen, "Expected ')' after arguments.")?;
        Some(Expr::new(
            ExprKind::Call { callee, args },
            start.to(self.previous_span()),
        ))
    }

    /// `args -> expression ("," expression)*`, possibly empty.
    fn parse_arguments(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            return Some(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.eat(&TokenKind::Comma) {
                return Some(args);
            }
        }
    }

    /// ```text
    /// literal -> IDENTIFIER | NUMBER | STRING | "true" | "false"
    ///          | "ask" "(" primary ")"
    ///          | "randint" "(" primary ")"
    ///          | "(" expression ")"
    /// ```
    fn parse_literal(&mut self) -> Option<Expr> {
        let literal = match self.peek_kind() {
            TokenKind::Identifier(name) => Some(Literal::Identifier(name.clone())),
            TokenKind::Number(n) => Some(Literal::Number(*n)),
            TokenKind::String(s) => Some(Literal::String(s.clone())),
            TokenKind::True => Some(Literal::Boolean(true)),
            TokenKind::False => Some(Literal::Boolean(false)),
            _ => None,
        };
        if let Some(literal) = literal {
            let span = self.advance().span;
            return Some(Expr::new(ExprKind::Literal(literal), span));
        }

        match self.peek_kind() {
            TokenKind::Ask => {
                let (operand, span) = self.parse_keyword_argument("ask")?;
                Some(Expr::new(ExprKind::Ask(Box::new(operand)), span))
            }
            TokenKind::Randint => {
                let (operand, span) = self.parse_keyword_argument("randint")?;
                Some(Expr::new(ExprKind::Randint(Box::new(operand)), span))
            }
            TokenKind::LParen => {
                let start = self.advance().span;
                if !self.enter_nesting() {
                    return None;
                }
                let inner = self.parse_expression();
                self.exit_nesting();
                let inner = inner?;
                self.expect(&TokenKind::RParen, "Expected ')' after expression.")?;
                Some(Expr::new(
                    ExprKind::Grouping(Box::new(inner)),
                    start.to(self.previous_span()),
                ))
            }
            _ => {
                self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, "Expected expression.");
                None
            }
        }
    }

    /// `keyword "(" primary ")"`, shared by `ask` and `randint`.
    fn parse_keyword_argument(&mut self, keyword: &str) -> Option<(Expr, Span)> {
        let start = self.advance().span;
        self.expect(
            &TokenKind::LParen,
            &format!("Expected '(' after '{keyword}'."),
        )?;
        if !self.enter_nesting() {
            return None;
        }
        let operand = self.parse_primary();
        self.exit_nesting();
        let operand = operand?;
        self.expect(
            &TokenKind::RParen,
            &format!("Expected ')' after '{keyword}' argument."),
        )?;
        Some((operand, start.to(self.previous_span())))
    }
}

fn comparison_op(kind: &TokenKind) -> Option<ComparisonOp> {
    Some(match kind {
        TokenKind::Less => ComparisonOp::Less,
        TokenKind::LessEq => ComparisonOp::LessEq,
        TokenKind::Greater => ComparisonOp::Greater,
        TokenKind::GreaterEq => ComparisonOp::GreaterEq,
        TokenKind::EqEq => ComparisonOp::Eq,
        TokenKind::BangEq => ComparisonOp::NotEq,
        TokenKind::And => ComparisonOp::And,
        TokenKind::Or => ComparisonOp::Or,
        _ => return None,
    })
}

fn arithmetic_op(kind: &TokenKind) -> Option<ArithmeticOp> {
    Some(match kind {
        TokenKind::Plus => ArithmeticOp::Add,
        TokenKind::Minus => ArithmeticOp::Sub,
        TokenKind::Star => ArithmeticOp::Mul,
        TokenKind::Slash => ArithmeticOp::Div,
        TokenKind::Percent => ArithmeticOp::Mod,
        _ => return None,
    })
}
