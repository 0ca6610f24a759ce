use predicates::prelude::*;

fn run_on(path: &std::path::Path, extra: &[&str]) -> assert_cmd::assert::Assert {
  let mut cmd = test_support::cmd_bin("wrap-debug-prints");
  cmd.args(extra).arg(path).assert()
}

#[test]
fn wraps_single_call_and_reports_path() {
  let (_td, path) = test_support::temp_source("a.dart", "  debugPrint(\"hello\");");
  run_on(&path, &[])
    .success()
    .stdout(predicate::str::contains("Wrapped debugPrint calls in").and(predicate::str::contains("a.dart")));
  assert_eq!(
    std::fs::read_to_string(&path).unwrap(),
    "  if (kDebugMode) {\n    debugPrint(\"hello\");\n  }"
  );
}

#[test]
fn already_guarded_call_is_left_byte_identical() {
  let input = "  if (kDebugMode) {\n    debugPrint(\"x\");";
  let (_td, path) = test_support::temp_source("a.dart", input);
  run_on(&path, &[]).success();
  assert_eq!(std::fs::read_to_string(&path).unwrap(), input);
}

#[test]
fn file_without_calls_is_unchanged() {
  let input = "void main() {\n  print('hi');\n}\n";
  let (_td, path) = test_support::temp_source("a.dart", input);
  run_on(&path, &[]).success();
  assert_eq!(std::fs::read_to_string(&path).unwrap(), input);
}

#[test]
fn stdout_mode_prints_and_keeps_file() {
  let input = "debugPrint('a');\n";
  let (_td, path) = test_support::temp_source("a.dart", input);
  run_on(&path, &["--stdout"])
    .success()
    .stdout("if (kDebugMode) {\n  debugPrint('a');\n}\n");
  assert_eq!(std::fs::read_to_string(&path).unwrap(), input);
}

#[test]
fn strict_mode_fails_on_unclosed_call() {
  let input = "void f() {\n  debugPrint(\n    'oops',\n}\n";
  let (_td, path) = test_support::temp_source("a.dart", input);
  run_on(&path, &["--strict"])
    .failure()
    .stderr(predicate::str::contains("a.dart:2:"));
  assert_eq!(std::fs::read_to_string(&path).unwrap(), input);
}

#[test]
fn best_effort_mode_wraps_unclosed_call_to_end() {
  let (_td, path) = test_support::temp_source("a.dart", "debugPrint(\n  'oops',");
  run_on(&path, &[]).success();
  assert_eq!(
    std::fs::read_to_string(&path).unwrap(),
    "if (kDebugMode) {\n  debugPrint(\n    'oops',\n}"
  );
}

#[test]
fn custom_function_guard_and_indent() {
  let (_td, path) = test_support::temp_source("Log.kt", "    log(\"x\")\n    debugPrint(\"y\")");
  run_on(&path, &["--function", "log", "--guard", "if (BuildConfig.DEBUG)", "--indent", "4"])
    .success()
    .stdout(predicate::str::contains("Wrapped log calls in"));
  assert_eq!(
    std::fs::read_to_string(&path).unwrap(),
    "    if (BuildConfig.DEBUG) {\n        log(\"x\")\n    }\n    debugPrint(\"y\")"
  );
}

#[test]
fn assert_prefix_trailing_space_is_a_word_boundary() {
  let (_td, path) = test_support::temp_source("a.dart", "assertThat(x);\ndebugPrint('a');");
  run_on(&path, &["--assert-prefix", "assert "]).success();
  assert_eq!(
    std::fs::read_to_string(&path).unwrap(),
    "assertThat(x);\nif (kDebugMode) {\n  debugPrint('a');\n}"
  );
}

#[test]
fn guard_with_its_own_brace_is_not_doubled() {
  let (_td, path) = test_support::temp_source("a.dart", "debugPrint('a');");
  run_on(&path, &["--guard", "if (kDebugMode) {"]).success();
  assert_eq!(
    std::fs::read_to_string(&path).unwrap(),
    "if (kDebugMode) {\n  debugPrint('a');\n}"
  );
}
