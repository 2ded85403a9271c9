//! End-to-end pipeline tests.
//!
//! Tests verify the full pipeline: source → scan → parse → interpret, the
//! stage-gating rules, diagnostic rendering, and JSON output.

use curt::{
    check, parse, report, run_source, scan, BufferConsole, ErrorCategory, ErrorCode, EvalConfig,
    Interpreter, RunResult, SourceFile, Stage,
};

// ══════════════════════════════════════════════════════════════════════════════
// Sample programs
// ══════════════════════════════════════════════════════════════════════════════

const FIZZBUZZ: &str = r#"
// Classic FizzBuzz over 1..15
for (make i = 1; i <= 15; ++i) {
  if (i % 15 == 0) { show("FizzBuzz") }
  elif (i % 3 == 0) { show("Fizz") }
  elif (i % 5 == 0) { show("Buzz") }
  else { show(i) }
}
"#;

const GREETER: &str = r#"
func greet(name) {
  return "Hello, " + name + "!"
}
make who = ask("Who are you? ")
show(call greet(who))
"#;

const PRIMES: &str = r#"
func is_prime(n) {
  if (n < 2) { return false }
  for (make d = 2; d * d <= n; ++d) {
    if (n % d == 0) { return false }
  }
  return true
}
make count = 0
make k = 0
while (count < 5) {
  if (call is_prime(k)) { show(k); make count = count + 1 }
  ++k
}
"#;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn interpreter(input: &[&str]) -> Interpreter<BufferConsole> {
    Interpreter::with_console(
        BufferConsole::with_input(input.iter().copied()),
        EvalConfig::default().with_seed(1),
    )
}

fn run(source: &str, input: &[&str]) -> (RunResult, String) {
    let mut interp = interpreter(input);
    let result = run_source(source, "test.curt", &mut interp);
    (result, interp.console().output().to_string())
}

fn rendered(result: &RunResult) -> String {
    let mut buf = Vec::new();
    report(&result.errors, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

// ══════════════════════════════════════════════════════════════════════════════
// Successful runs
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn fizzbuzz() {
    let (result, out) = run(FIZZBUZZ, &[]);
    assert!(result.success);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[2], "Fizz");
    assert_eq!(lines[4], "Buzz");
    assert_eq!(lines[14], "FizzBuzz");
    assert_eq!(lines[6], "7");
}

#[test]
fn greeter_reads_input() {
    let (result, out) = run(GREETER, &["Ada"]);
    assert!(result.success);
    assert_eq!(out, "Who are you? Hello, Ada!\n");
}

#[test]
fn primes() {
    let (result, out) = run(PRIMES, &[]);
    assert!(result.success, "{}", rendered(&result));
    assert_eq!(out, "2\n3\n5\n7\n11\n");
}

#[test]
fn completed_run_has_no_errors() {
    let (result, _) = run("show(1)", &[]);
    assert_eq!(result.failed_stage, None);
    assert!(!result.errors.has_errors());
}

#[test]
fn repl_style_runs_share_bindings() {
    let mut interp = interpreter(&[]);
    assert!(run_source("make total = 10", "<repl>", &mut interp).success);
    assert!(run_source("make total = total + 5", "<repl>", &mut interp).success);
    assert!(run_source("show(total)", "<repl>", &mut interp).success);
    assert_eq!(interp.console().output(), "15\n");
}

#[test]
fn repl_continues_after_runtime_error() {
    let mut interp = interpreter(&[]);
    let failed = run_source("show(missing)", "<repl>", &mut interp);
    assert_eq!(failed.failed_stage, Some(Stage::Runtime));
    assert!(run_source("show(2)", "<repl>", &mut interp).success);
    assert_eq!(interp.console().output(), "2\n");
}

// ══════════════════════════════════════════════════════════════════════════════
// Stage gating
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn syntax_error_stops_before_parse() {
    // The `show` would run if the program got that far.
    let (result, out) = run("show(1)\nmake x = 3 # 4", &[]);
    assert!(!result.success);
    assert_eq!(result.failed_stage, Some(Stage::Scan));
    assert_eq!(result.errors.errors[0].category, ErrorCategory::Syntax);
    assert_eq!(out, "");
}

#[test]
fn parse_error_stops_before_run() {
    let (result, out) = run("show(1)\nmake = 3", &[]);
    assert_eq!(result.failed_stage, Some(Stage::Parse));
    assert_eq!(result.errors.errors[0].category, ErrorCategory::Parse);
    assert_eq!(out, "");
}

#[test]
fn runtime_error_keeps_earlier_output() {
    let (result, out) = run("show(1)\nshow(1 / 0)\nshow(2)", &[]);
    assert_eq!(result.failed_stage, Some(Stage::Runtime));
    assert_eq!(result.errors.total_errors, 1);
    assert_eq!(result.errors.errors[0].code, ErrorCode::DIVISION_BY_ZERO);
    assert_eq!(out, "1\n");
}

#[test]
fn staged_operations_compose() {
    let sf = SourceFile::new("stages.curt", "make a = 2\nshow(a * 21)");
    let lexed = scan(&sf);
    assert!(!lexed.had_errors());
    let parsed = parse(lexed.tokens, &sf);
    assert!(!parsed.had_errors());
    let mut interp = interpreter(&[]);
    assert!(curt::interpret(&parsed.program, &mut interp).is_ok());
    assert_eq!(interp.console().output(), "42\n");
}

#[test]
fn oversized_chain_is_a_parse_error() {
    let (result, out) = run(&format!("show({}1)", "1 + ".repeat(20_000)), &[]);
    assert_eq!(result.failed_stage, Some(Stage::Parse));
    assert_eq!(result.errors.errors[0].code, ErrorCode::NESTING_TOO_DEEP);
    assert_eq!(out, "");
}

#[test]
fn runaway_recursion_is_a_runtime_error() {
    let mut interp = Interpreter::with_console(BufferConsole::new(), EvalConfig::default());
    let result = run_source(
        "func down(n) { return call down(n + 1) }\ncall down(0)",
        "deep.curt",
        &mut interp,
    );
    assert_eq!(result.failed_stage, Some(Stage::Runtime));
    assert_eq!(result.errors.errors[0].code, ErrorCode::CALL_DEPTH_EXCEEDED);
}

// ══════════════════════════════════════════════════════════════════════════════
// Diagnostics
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn report_renders_each_error() {
    let (result, _) = run("make a = 1 $\nmake b = 2 ?", &[]);
    assert_eq!(
        rendered(&result),
        "Line 1 Error [at '$']: Unexpected character '$'\n\
         Line 2 Error [at '?']: Unexpected character '?'\n"
    );
}

#[test]
fn report_parse_error_at_end() {
    let (result, _) = run("while (true) {", &[]);
    assert_eq!(
        rendered(&result),
        "Line 1 Error [at end]: Expected '}' to close the block.\n"
    );
}

#[test]
fn report_runtime_error() {
    let (result, _) = run("make a = 1\nshow(b)", &[]);
    assert_eq!(
        rendered(&result),
        "Line 2 Error [runtime]: Undefined identifier 'b'.\n"
    );
    assert_eq!(result.errors.errors[0].source_line, "show(b)");
}

#[test]
fn multiple_parse_errors_in_one_pass() {
    let diags = check("make = 1\nshow(2)\nfunc (a) { }\n", "multi.curt");
    assert!(diags.total_errors >= 2);
    assert!(diags.iter().all(|e| e.category == ErrorCategory::Parse));
    assert!(diags.iter().all(|e| e.file == "multi.curt"));
}

#[test]
fn run_result_json() {
    let (result, _) = run("show(x)", &[]);
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["failed_stage"], "runtime");
    let err = &json["errors"]["errors"][0];
    assert_eq!(err["category"], "runtime");
    assert_eq!(err["location"], "runtime");
    assert_eq!(err["line"], 1);
    assert_eq!(json["errors"]["total_errors"], 1);
}

#[test]
fn successful_run_json() {
    let (result, _) = run("show(1)", &[]);
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["success"], true);
    assert!(json["failed_stage"].is_null());
}

// ══════════════════════════════════════════════════════════════════════════════
// Determinism
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn determinism_100_iterations() {
    let (first, first_out) = run(FIZZBUZZ, &[]);
    for i in 0..100 {
        let (result, out) = run(FIZZBUZZ, &[]);
        assert_eq!(first, result, "Determinism failure at iteration {i}");
        assert_eq!(first_out, out, "Output differs at iteration {i}");
    }
}
