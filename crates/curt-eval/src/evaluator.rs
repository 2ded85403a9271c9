//! Core statement and expression evaluator.

use crate::config::EvalConfig;
use crate::console::{Console, StdConsole};
use crate::env::Environment;
use crate::error::{EvalResult, RuntimeErrorKind};
use crate::natives::{self, NativeHost};
use crate::ops;
use crate::value::{UserFunction, Value};
use curt_types::ast::*;
use curt_types::Span;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;

/// Remaining stack below which evaluation moves onto a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated for deep recursion.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    /// Carry on with the next statement.
    Normal,
    /// A `return` ran; unwind to the enclosing call with this value.
    Returning(Value),
}

/// The tree-walking interpreter.
///
/// Owns the run's single environment. The environment persists across
/// [`interpret`](Self::interpret) calls, so a host can feed a program in
/// pieces (one REPL line at a time) and keep earlier bindings.
pub struct Interpreter<C: Console = StdConsole> {
    env: Environment,
    console: C,
    rng: StdRng,
    config: EvalConfig,
    /// Active user-function calls.
    call_depth: usize,
}

impl Interpreter<StdConsole> {
    /// An interpreter on the process's stdout / stdin with default settings.
    pub fn new() -> Self {
        Self::with_console(StdConsole, EvalConfig::default())
    }
}

impl Default for Interpreter<StdConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console> Interpreter<C> {
    pub fn with_console(console: C, config: EvalConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut env = Environment::new();
        natives::install(&mut env);
        Self {
            env,
            console,
            rng,
            config,
            call_depth: 0,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Run top-level statements in order, stopping at the first runtime error.
    pub fn interpret(&mut self, program: &Program) -> EvalResult<()> {
        self.call_depth = 0;
        for stmt in &program.stmts {
            // The parser rejects top-level `return`; a hand-built tree that
            // has one simply ends the run there.
            if let ExecResult::Returning(_) = self.exec_stmt(stmt)? {
                break;
            }
        }
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Statements
    // ══════════════════════════════════════════════════════════════════════

    /// Execute one statement, growing the stack when recursion runs deep.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<ExecResult> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> EvalResult<ExecResult> {
        match stmt {
            Stmt::Assignment(assign) => {
                self.exec_assignment(assign)?;
                Ok(ExecResult::Normal)
            }
            Stmt::If(if_stmt) => self.exec_if(if_stmt),
            Stmt::While(while_stmt) => self.exec_while(while_stmt),
            Stmt::For(for_stmt) => self.exec_for(for_stmt),
            Stmt::Block(block) => self.exec_block(block),
            Stmt::Show(show) => {
                let value = self.eval_expr(&show.value)?;
                self.console
                    .write_line(&value.to_string())
                    .map_err(|e| RuntimeErrorKind::from(e).at(show.span))?;
                Ok(ExecResult::Normal)
            }
            Stmt::FunctionDef(def) => {
                let func = UserFunction {
                    name: def.name.name.clone(),
                    params: def.params.iter().map(|p| p.name.clone()).collect(),
                    body: def.body.clone(),
                };
                self.env.define(&def.name.name, Value::Function(Rc::new(func)));
                Ok(ExecResult::Normal)
            }
            Stmt::Return(ret) => Ok(ExecResult::Returning(self.eval_expr(&ret.value)?)),
            Stmt::Expr(expr_stmt) => {
                self.eval_expr(&expr_stmt.expr)?;
                Ok(ExecResult::Normal)
            }
        }
    }

    fn exec_assignment(&mut self, assign: &Assignment) -> EvalResult<()> {
        let value = self.eval_expr(&assign.value)?;
        self.env.define(&assign.name.name, value);
        Ok(())
    }

    /// Run each statement in order; a `Returning` result stops the block.
    pub fn exec_block(&mut self, block: &Block) -> EvalResult<ExecResult> {
        for stmt in &block.stmts {
            let result = self.exec_stmt(stmt)?;
            if let ExecResult::Returning(_) = result {
                return Ok(result);
            }
        }
        Ok(ExecResult::Normal)
    }

    fn exec_if(&mut self, if_stmt: &IfStmt) -> EvalResult<ExecResult> {
        for branch in &if_stmt.branches {
            if self.eval_condition(&branch.condition)? {
                return self.exec_block(&branch.block);
            }
        }
        match &if_stmt.else_block {
            Some(block) => self.exec_block(block),
            None => Ok(ExecResult::Normal),
        }
    }

    fn exec_while(&mut self, while_stmt: &WhileStmt) -> EvalResult<ExecResult> {
        while self.eval_condition(&while_stmt.condition)? {
            let result = self.exec_block(&while_stmt.body)?;
            if let ExecResult::Returning(_) = result {
                return Ok(result);
            }
        }
        Ok(ExecResult::Normal)
    }

    /// The loop variable is an ordinary global and outlives the loop.
    fn exec_for(&mut self, for_stmt: &ForStmt) -> EvalResult<ExecResult> {
        self.exec_assignment(&for_stmt.start)?;
        let var = &for_stmt.start.name.name;
        while self.eval_condition(&for_stmt.stop)? {
            let result = self.exec_block(&for_stmt.body)?;
            if let ExecResult::Returning(_) = result {
                return Ok(result);
            }
            let next = self.eval_expr(&for_stmt.step)?;
            self.env.define(var, next);
        }
        Ok(ExecResult::Normal)
    }

    fn eval_condition(&mut self, condition: &Expr) -> EvalResult<bool> {
        match self.eval_expr(condition)? {
            Value::Boolean(b) => Ok(b),
            other => Err(RuntimeErrorKind::ConditionNotBoolean(other.describe()).at(condition.span)),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Literal(literal) => self.eval_literal(literal, expr.span),
            ExprKind::Grouping(inner) => self.eval_expr(inner),

            ExprKind::Negation { op, operand } => {
                let value = self.eval_expr(operand)?;
                ops::negation(*op)(&value).map_err(|e| e.at(expr.span))
            }
            ExprKind::Step { op, operand } => {
                let value = self.eval_expr(operand)?;
                let stepped = ops::step(*op)(&value).map_err(|e| e.at(expr.span))?;
                if let Some(name) = operand.assignable_name() {
                    self.env.define(name, stepped.clone());
                }
                Ok(stepped)
            }
            ExprKind::Comparison { left, op, right } => {
                let lv = self.eval_expr(left)?;
                let rv = self.eval_expr(right)?;
                ops::comparison(*op)(&lv, &rv).map_err(|e| e.at(expr.span))
            }
            ExprKind::Arithmetic { left, op, right } => {
                let lv = self.eval_expr(left)?;
                let rv = self.eval_expr(right)?;
                ops::arithmetic(*op)(&lv, &rv).map_err(|e| e.at(expr.span))
            }

            ExprKind::Ask(prompt) => {
                let prompt = self.eval_expr(prompt)?;
                self.write(&prompt.to_string())
                    .and_then(|()| self.read_line())
                    .map(Value::String)
                    .map_err(|e| e.at(expr.span))
            }
            ExprKind::Randint(bound) => match self.eval_expr(bound)? {
                Value::Integer(n) => self
                    .random_below(n)
                    .map(Value::Integer)
                    .map_err(|e| e.at(expr.span)),
                other => Err(RuntimeErrorKind::ArgumentType {
                    function: "randint".into(),
                    position: 1,
                    expected: "an integer",
                    found: other.describe(),
                }
                .at(expr.span)),
            },

            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.span),
        }
    }

    fn eval_literal(&self, literal: &Literal, span: Span) -> EvalResult<Value> {
        match literal {
            Literal::Number(n) => Ok(Value::Integer(*n)),
            Literal::String(s) => Ok(Value::String(s.clone())),
            Literal::Boolean(b) => Ok(Value::Boolean(*b)),
            Literal::Identifier(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeErrorKind::UndefinedIdentifier(name.clone()).at(span)),
        }
    }

    // ── Calls ────────────────────────────────────────────────────────────

    fn eval_call(&mut self, callee: &Ident, args: &[Expr], span: Span) -> EvalResult<Value> {
        let target = self
            .env
            .get(&callee.name)
            .cloned()
            .ok_or_else(|| RuntimeErrorKind::UndefinedFunction(callee.name.clone()).at(span))?;

        match target {
            Value::Native(native) => {
                let values = self.eval_args(args)?;
                native.invoke(self, &values).map_err(|e| e.at(span))
            }
            Value::Function(func) => {
                let values = self.eval_args(args)?;
                self.call_function(&func, values, span)
            }
            other => Err(RuntimeErrorKind::NotCallable {
                name: callee.name.clone(),
                found: other.describe(),
            }
            .at(span)),
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> EvalResult<Vec<Value>> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    /// Bind parameters globally, run the body, and yield its return value
    /// (`null` if the body finishes without `return`).
    fn call_function(
        &mut self,
        func: &UserFunction,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult<Value> {
        if args.len() != func.params.len() {
            return Err(RuntimeErrorKind::WrongArgCount {
                function: func.name.clone(),
                expected: func.params.len(),
                found: args.len(),
            }
            .at(span));
        }
        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeErrorKind::CallDepthExceeded(self.config.max_call_depth).at(span));
        }

        for (param, value) in func.params.iter().zip(args) {
            self.env.define(param, value);
        }

        self.call_depth += 1;
        let result = self.exec_block(&func.body);
        self.call_depth -= 1;

        match result? {
            ExecResult::Returning(value) => Ok(value),
            ExecResult::Normal => Ok(Value::Null),
        }
    }
}

impl<C: Console> NativeHost for Interpreter<C> {
    fn write(&mut self, text: &str) -> Result<(), RuntimeErrorKind> {
        self.console.write(text).map_err(RuntimeErrorKind::from)
    }

    fn write_line(&mut self, text: &str) -> Result<(), RuntimeErrorKind> {
        self.console.write_line(text).map_err(RuntimeErrorKind::from)
    }

    fn read_line(&mut self) -> Result<String, RuntimeErrorKind> {
        self.console.read_line().map_err(RuntimeErrorKind::from)
    }

    fn random_below(&mut self, bound: i64) -> Result<i64, RuntimeErrorKind> {
        if bound <= 0 {
            return Err(RuntimeErrorKind::OutOfRange(format!(
                "Random bound must be positive, got {bound}."
            )));
        }
        Ok(self.rng.gen_range(0..bound))
    }

    fn bound_names(&self) -> Vec<String> {
        self.env.names().map(str::to_string).collect()
    }
}
