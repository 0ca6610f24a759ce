// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Scan source text line by line and wrap unguarded debug-print call sites in a debug-mode guard
// role: core/transform
// inputs: Source text (UTF-8), GuardStyle (function name, guard prefix, assertion prefix, indent unit)
// outputs: Wrapped { text, summary } with the rewritten text and the call sites it touched
// side_effects: None (pure); emits tracing events only
// invariants:
// - Lines outside wrapped call sites are copied byte-for-byte
// - Each wrapped line is the original line prefixed by exactly one indent unit
// - A call whose previous input line (trimmed) starts with the guard or assertion prefix is left as-is
// - Text without call sites round-trips unchanged (split/join on '\n' keeps trailing newlines)
// errors: Only GuardInserter::new can fail (pattern compilation)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, warn};

pub const DEFAULT_FUNCTION: &str = "debugPrint";
pub const DEFAULT_GUARD: &str = "if (kDebugMode)";
pub const DEFAULT_ASSERT_PREFIX: &str = "assert(";
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// What to look for and how to wrap it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardStyle {
  /// Identifier of the debug-print function, matched literally.
  pub function: String,
  /// Guard conditional emitted before a call site (without the opening brace).
  pub guard: String,
  /// A previous line starting with this counts as guarded too.
  pub assert_prefix: String,
  /// Prefix added to every line of a wrapped call site.
  pub indent_unit: String,
}

impl Default for GuardStyle {
  fn default() -> Self {
    Self {
      function: DEFAULT_FUNCTION.to_string(),
      guard: DEFAULT_GUARD.to_string(),
      assert_prefix: DEFAULT_ASSERT_PREFIX.to_string(),
      indent_unit: " ".repeat(DEFAULT_INDENT_WIDTH),
    }
  }
}

impl GuardStyle {
  /// True when `line`, trimmed, already opens a guard or an assertion.
  pub fn is_guard_line(&self, line: &str) -> bool {
    let t = line.trim();
    t.starts_with(&self.guard) || t.starts_with(&self.assert_prefix)
  }

  fn open_line(&self, indent: &str) -> String {
    format!("{}{} {{", indent, self.guard)
  }

  fn close_line(&self, indent: &str) -> String {
    format!("{}}}", indent)
  }
}

/// Half-open line range `[start, end)` of one call, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
  pub start: usize,
  pub end: usize,
  /// False when the parentheses never balanced before end of input.
  pub terminated: bool,
}

impl CallSite {
  pub fn len(&self) -> usize {
    self.end - self.start
  }

  /// 1-based line number of the call's first line, for messages.
  pub fn line_number(&self) -> usize {
    self.start + 1
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapSummary {
  pub wrapped: Vec<CallSite>,
  pub skipped: usize,
}

impl WrapSummary {
  /// The call site that swallowed the rest of the input, if any.
  ///
  /// At most one can exist since it runs to the end of the text.
  pub fn unterminated(&self) -> Option<&CallSite> {
    self.wrapped.iter().find(|s| !s.terminated)
  }
}

#[derive(Debug, Clone)]
pub struct Wrapped {
  pub text: String,
  pub summary: WrapSummary,
}

impl Wrapped {
  pub fn changed(&self) -> bool {
    !self.summary.wrapped.is_empty()
  }
}

/// Count of `(` minus count of `)` on one line.
pub fn paren_balance(line: &str) -> i64 {
  line.bytes().fold(0, |acc, b| match b {
    b'(' => acc + 1,
    b')' => acc - 1,
    _ => acc,
  })
}

pub struct GuardInserter {
  style: GuardStyle,
  call_start: Regex,
}

impl GuardInserter {
  pub fn new(style: GuardStyle) -> Result<Self> {
    let pattern = format!(r"^(\s*){}\(", regex::escape(&style.function));
    let call_start =
      Regex::new(&pattern).with_context(|| format!("compiling call pattern for {:?}", style.function))?;
    Ok(Self { style, call_start })
  }

  pub fn style(&self) -> &GuardStyle {
    &self.style
  }

  /// Leading whitespace of `line` when it starts a call, `None` otherwise.
  pub fn call_indent<'a>(&self, line: &'a str) -> Option<&'a str> {
    self
      .call_start
      .captures(line)
      .and_then(|caps| caps.get(1))
      .map(|m| m.as_str())
  }

  /// Rewrite `text`, wrapping every unguarded call site.
  pub fn wrap(&self, text: &str) -> Wrapped {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut summary = WrapSummary::default();
    // whether the previous input line opens a guard or assertion
    let mut guarded_above = false;
    let mut i = 0;

    while i < lines.len() {
      let line = lines[i];

      let indent = match self.call_indent(line) {
        Some(indent) if !guarded_above => indent,
        Some(_) => {
          debug!(line = i + 1, "call already guarded");
          summary.skipped += 1;
          out.push(line.to_string());
          guarded_above = self.style.is_guard_line(line);
          i += 1;
          continue;
        }
        None => {
          out.push(line.to_string());
          guarded_above = self.style.is_guard_line(line);
          i += 1;
          continue;
        }
      };

      let site = self.extent(&lines, i);
      if !site.terminated {
        warn!(line = site.line_number(), "call never closes; wrapping to end of input");
      }
      debug!(line = site.line_number(), lines = site.len(), "wrapping call");

      out.push(self.style.open_line(indent));
      for l in &lines[site.start..site.end] {
        out.push(format!("{}{}", self.style.indent_unit, l));
      }
      out.push(self.style.close_line(indent));

      guarded_above = self.style.is_guard_line(lines[site.end - 1]);
      summary.wrapped.push(site);
      i = site.end;
    }

    Wrapped { text: out.join("\n"), summary }
  }

  fn extent(&self, lines: &[&str], start: usize) -> CallSite {
    let mut balance = paren_balance(lines[start]);
    let mut end = start + 1;

    while balance > 0 && end < lines.len() {
      balance += paren_balance(lines[end]);
      end += 1;
    }

    CallSite { start, end, terminated: balance <= 0 }
  }
}
