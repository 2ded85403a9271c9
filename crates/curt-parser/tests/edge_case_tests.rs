//! Grammar edge cases: nesting limits, keyword-named callees, and the
//! corners of the flat precedence levels.

use curt_lexer::Lexer;
use curt_parser::{ParseResult, Parser, MAX_NESTING, MAX_OPERATOR_CHAIN};
use curt_types::ast::*;
use curt_types::{ErrorCode, SourceFile};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse(source: &str) -> ParseResult {
    let sf = SourceFile::new("test.curt", source);
    let lex = Lexer::new(&sf).lex();
    Parser::new(lex.tokens, &sf).parse()
}

fn has_error(source: &str, code: ErrorCode) -> bool {
    parse(source).errors.errors.iter().any(|e| e.code == code)
}

fn nested_parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

fn nested_calls(depth: usize) -> String {
    format!("{}1{}", "call abs(".repeat(depth), ")".repeat(depth))
}

fn sum_chain(operators: usize) -> String {
    format!("{}1", "1 + ".repeat(operators))
}

fn nested_blocks(depth: usize) -> String {
    format!("{}show(1){}", "{ ".repeat(depth), " }".repeat(depth))
}

// ─────────────────────────────────────────────────────────────────────
// Nesting limits
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_parens_at_limit_accepted() {
    let result = parse(&nested_parens(MAX_NESTING as usize));
    assert!(!result.had_errors());
}

#[test]
fn test_parens_past_limit_rejected() {
    assert!(has_error(
        &nested_parens(MAX_NESTING as usize + 1),
        ErrorCode::NESTING_TOO_DEEP
    ));
}

#[test]
fn test_blocks_at_limit_accepted() {
    let result = parse(&nested_blocks(MAX_NESTING as usize));
    assert!(!result.had_errors());
}

#[test]
fn test_blocks_past_limit_rejected() {
    assert!(has_error(
        &nested_blocks(MAX_NESTING as usize + 1),
        ErrorCode::NESTING_TOO_DEEP
    ));
}

#[test]
fn test_prefix_chain_past_limit_rejected() {
    let source = format!("{}x", "not ".repeat(MAX_NESTING as usize + 1));
    assert!(has_error(&source, ErrorCode::NESTING_TOO_DEEP));
}

#[test]
fn test_very_deep_input_does_not_overflow() {
    // Far past the limit; the guard stops recursion long before the stack does.
    let result = parse(&nested_parens(1_000));
    assert!(result.had_errors());
}

#[test]
fn test_calls_at_limit_accepted() {
    let result = parse(&nested_calls(MAX_NESTING as usize));
    assert!(!result.had_errors());
}

#[test]
fn test_calls_past_limit_rejected() {
    assert!(has_error(
        &nested_calls(MAX_NESTING as usize + 1),
        ErrorCode::NESTING_TOO_DEEP
    ));
}

#[test]
fn test_very_deep_calls_do_not_overflow() {
    assert!(has_error(&nested_calls(1_000), ErrorCode::NESTING_TOO_DEEP));
}

#[test]
fn test_very_deep_keyword_arguments_do_not_overflow() {
    let randint = format!("{}1{}", "randint(".repeat(1_000), ")".repeat(1_000));
    assert!(has_error(&randint, ErrorCode::NESTING_TOO_DEEP));
    let ask = format!("{}\"?\"{}", "ask(".repeat(1_000), ")".repeat(1_000));
    assert!(has_error(&ask, ErrorCode::NESTING_TOO_DEEP));
}

// ─────────────────────────────────────────────────────────────────────
// Operator chain limit
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_chain_at_limit_accepted() {
    let result = parse(&sum_chain(MAX_OPERATOR_CHAIN as usize));
    assert!(!result.had_errors());
}

#[test]
fn test_chain_past_limit_rejected() {
    let result = parse(&sum_chain(MAX_OPERATOR_CHAIN as usize + 1));
    assert_eq!(result.errors.total_errors, 1);
    assert_eq!(result.errors.errors[0].code, ErrorCode::NESTING_TOO_DEEP);
}

#[test]
fn test_very_long_chain_does_not_overflow() {
    assert!(has_error(&sum_chain(20_000), ErrorCode::NESTING_TOO_DEEP));
    assert!(has_error(
        &format!("show({}true)", "true and ".repeat(20_000)),
        ErrorCode::NESTING_TOO_DEEP
    ));
}

#[test]
fn test_chain_counts_enclosing_expressions() {
    let source = format!("{}({})", "1 + ".repeat(600), sum_chain(600));
    assert!(has_error(&source, ErrorCode::NESTING_TOO_DEEP));
}

#[test]
fn test_chain_budget_released_between_statements() {
    let source = format!("{}\n{}", sum_chain(900), sum_chain(900));
    let result = parse(&source);
    assert!(!result.had_errors());
    assert_eq!(result.program.stmts.len(), 2);
}

// ─────────────────────────────────────────────────────────────────────
// Flat precedence corners
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_subtraction_left_associative() {
    let result = parse("10 - 4 - 3");
    let Stmt::Expr(stmt) = &result.program.stmts[0] else {
        panic!("expected expression statement");
    };
    let ExprKind::Arithmetic { left, right, .. } = &stmt.expr.kind else {
        panic!("expected arithmetic");
    };
    assert_eq!(right.kind, ExprKind::Literal(Literal::Number(3)));
    assert!(matches!(left.kind, ExprKind::Arithmetic { .. }));
}

#[test]
fn test_or_and_evaluate_left_to_right() {
    // `a or b and c` groups as `(a or b) and c`.
    let result = parse("a or b and c");
    let Stmt::Expr(stmt) = &result.program.stmts[0] else {
        panic!("expected expression statement");
    };
    let ExprKind::Comparison { left, op, .. } = &stmt.expr.kind else {
        panic!("expected comparison");
    };
    assert_eq!(*op, ComparisonOp::And);
    assert!(matches!(left.kind, ExprKind::Comparison { op: ComparisonOp::Or, .. }));
}

#[test]
fn test_minus_minus_is_step_not_double_negation() {
    let result = parse("--x");
    let Stmt::Expr(stmt) = &result.program.stmts[0] else {
        panic!("expected expression statement");
    };
    assert!(matches!(stmt.expr.kind, ExprKind::Step { op: StepOp::Decrement, .. }));
}

#[test]
fn test_separated_minus_is_double_negation() {
    let result = parse("- -x");
    let Stmt::Expr(stmt) = &result.program.stmts[0] else {
        panic!("expected expression statement");
    };
    let ExprKind::Negation { operand, .. } = &stmt.expr.kind else {
        panic!("expected negation");
    };
    assert!(matches!(operand.kind, ExprKind::Negation { .. }));
}

#[test]
fn test_step_on_grouped_identifier() {
    let result = parse("++(i)");
    let Stmt::Expr(stmt) = &result.program.stmts[0] else {
        panic!("expected expression statement");
    };
    let ExprKind::Step { operand, .. } = &stmt.expr.kind else {
        panic!("expected step");
    };
    assert_eq!(operand.assignable_name(), Some("i"));
}

// ─────────────────────────────────────────────────────────────────────
// Keyword corners
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_show_keyword_is_statement_not_expression() {
    // `show` on its own starts a statement; it cannot appear as an operand.
    assert!(parse("make x = show(1)").had_errors());
    assert!(!parse("make x = call show(1)").had_errors());
}

#[test]
fn test_call_requires_parentheses() {
    assert!(parse("call f").had_errors());
}

#[test]
fn test_call_non_identifier_rejected() {
    let result = parse("call 5()");
    assert_eq!(result.errors.errors[0].location, "at '5'");
}

#[test]
fn test_elif_without_if_rejected() {
    assert!(parse("elif (true) { }").had_errors());
}

#[test]
fn test_else_on_its_own_line() {
    let result = parse("if (false) {\n}\nelse\n{\nshow(1)\n}");
    assert!(!result.had_errors());
    assert_eq!(result.program.stmts.len(), 1);
}
