//! Statement parsing.

use crate::parser::Parser;
use curt_lexer::token::TokenKind;
use curt_types::ast::*;
use curt_types::ErrorCode;

impl<'src> Parser<'src> {
    /// ```text
    /// statement -> assignment | if | while | for | funcDef | return | show
    ///            | block | expression
    /// ```
    ///
    /// Any statement may be followed by an optional `;`.
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        let stmt = match self.peek_kind() {
            TokenKind::Make => self.parse_assignment().map(Stmt::Assignment),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Func => self.parse_function_def(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Show => self.parse_show(),
            TokenKind::LBrace => self.parse_block().map(Stmt::Block),
            _ => {
                let expr = self.parse_expression()?;
                let span = expr.span;
                Some(Stmt::Expr(ExprStmt { expr, span }))
            }
        }?;
        self.eat(&TokenKind::Semicolon);
        Some(stmt)
    }

    /// `block -> "{" statement* "}"`
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let start = self.current_span();
        self.expect(&TokenKind::LBrace, "Expected '{' to open a block.")?;
        if !self.enter_nesting() {
            return None;
        }
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                // Skip the offending token, but leave a `}` to close this block.
                None if !self.check(&TokenKind::RBrace) => {
                    self.advance();
                }
                None => {}
            }
        }
        self.exit_nesting();
        self.expect(&TokenKind::RBrace, "Expected '}' to close the block.")?;
        Some(Block {
            stmts,
            span: start.to(self.previous_span()),
        })
    }

    /// `assignment -> "make" IDENTIFIER "=" expression`
    pub(crate) fn parse_assignment(&mut self) -> Option<Assignment> {
        let start = self.advance().span; // `make`
        let name = self.expect_identifier("Expected identifier after 'make'.")?;
        self.expect(&TokenKind::Eq, "Expected '=' after identifier in assignment.")?;
        let value = self.parse_expression()?;
        Some(Assignment {
            name,
            span: start.to(value.span),
            value,
        })
    }

    /// `"(" expression ")"` after `if`, `elif` and `while`.
    fn parse_condition(&mut self, keyword: &str) -> Option<Expr> {
        self.expect(
            &TokenKind::LParen,
            &format!("Expected '(' after '{keyword}'."),
        )?;
        let condition = self.parse_expression()?;
        self.expect(
            &TokenKind::RParen,
            &format!("Expected ')' after '{keyword}' condition."),
        )?;
        Some(condition)
    }

    /// `if -> "if" "(" expr ")" block ("elif" "(" expr ")" block)* ("else" block)?`
    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `if`
        let condition = self.parse_condition("if")?;
        let block = self.parse_block()?;
        let mut branches = vec![CondBranch { condition, block }];

        while self.eat(&TokenKind::Elif) {
            let condition = self.parse_condition("elif")?;
            let block = self.parse_block()?;
            branches.push(CondBranch { condition, block });
        }

        let else_block = if self.eat(&TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Some(Stmt::If(IfStmt {
            branches,
            else_block,
            span: start.to(self.previous_span()),
        }))
    }

    /// `while -> "while" "(" expression ")" block`
    fn parse_while(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `while`
        let condition = self.parse_condition("while")?;
        let body = self.parse_block()?;
        Some(Stmt::While(WhileStmt {
            condition,
            span: start.to(body.span),
            body,
        }))
    }

    /// `for -> "for" "(" assignment ";" expression ";" expression ")" block`
    fn parse_for(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `for`
        self.expect(&TokenKind::LParen, "Expected '(' after 'for'.")?;
        if !self.check(&TokenKind::Make) {
            self.error_at_current(
                ErrorCode::UNEXPECTED_TOKEN,
                "Expected 'make' to start the for loop.",
            );
            return None;
        }
        let init = self.parse_assignment()?;
        self.expect(&TokenKind::Semicolon, "Expected ';' after for loop start.")?;
        let stop = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon, "Expected ';' after for loop stop condition.")?;
        let step = self.parse_expression()?;
        self.expect(&TokenKind::RParen, "Expected ')' after for loop step.")?;
        let body = self.parse_block()?;
        Some(Stmt::For(ForStmt {
            start: init,
            stop,
            step,
            span: start.to(body.span),
            body,
        }))
    }

    /// `funcDef -> "func" IDENTIFIER "(" (IDENTIFIER ("," IDENTIFIER)*)? ")" block`
    fn parse_function_def(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `func`
        let name = self.expect_identifier("Expected function name after 'func'.")?;
        self.expect(&TokenKind::LParen, "Expected '(' after function name.")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.expect_identifier("Expected parameter name.")?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "Expected ')' after parameters.")?;

        self.function_depth += 1;
        let body = self.parse_block();
        self.function_depth -= 1;
        let body = body?;

        Some(Stmt::FunctionDef(FunctionDef {
            name,
            params,
            span: start.to(body.span),
            body,
        }))
    }

    /// `return -> "return" expression`
    fn parse_return(&mut self) -> Option<Stmt> {
        let keyword = self.advance();
        if self.function_depth == 0 {
            self.error_at(
                &keyword,
                ErrorCode::RETURN_OUTSIDE_FUNCTION,
                "'return' outside of a function body.",
            );
        }
        let value = self.parse_expression()?;
        Some(Stmt::Return(ReturnStmt {
            span: keyword.span.to(value.span),
            value,
        }))
    }

    /// `show -> "show" "(" expression ")"`
    fn parse_show(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `show`
        self.expect(&TokenKind::LParen, "Expected '(' after 'show'.")?;
        let value = self.parse_expression()?;
        self.expect(&TokenKind::RParen, "Expected ')' after show value.")?;
        Some(Stmt::Show(ShowStmt {
            value,
            span: start.to(self.previous_span()),
        }))
    }
}
