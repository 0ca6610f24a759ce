// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Command-line surface and normalization into an EffectiveConfig
// role: cli/config
// inputs: Process arguments (clap derive)
// outputs: Cli (raw), EffectiveConfig (validated), GuardStyle/OutputMode for the rewriter
// invariants:
// - normalize never touches the filesystem
// - EffectiveConfig always has a non-empty function, non-empty guard, and indent >= 1
// errors: bail! with a flag-specific message on invalid option values
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::guard::{self, GuardStyle};
use crate::rewrite::OutputMode;

pub const USAGE: &str = "Usage: wrap-debug-prints <file_path>";

#[derive(Parser, Debug)]
#[command(
    name = "wrap-debug-prints",
    version,
    about = "Wrap unguarded debugPrint calls in kDebugMode guards, in place",
    long_about = None
)]
pub struct Cli {
  /// Source file to rewrite in place
  pub file: Option<PathBuf>,

  /// Debug-print function to look for at the start of a line
  #[arg(long, default_value = guard::DEFAULT_FUNCTION)]
  pub function: String,

  /// Guard conditional inserted before each call (an opening brace is appended)
  #[arg(long, default_value = guard::DEFAULT_GUARD)]
  pub guard: String,

  /// A call directly below a line starting with this is treated as guarded
  #[arg(long, default_value = guard::DEFAULT_ASSERT_PREFIX)]
  pub assert_prefix: String,

  /// Spaces added in front of each wrapped line
  #[arg(long, default_value_t = guard::DEFAULT_INDENT_WIDTH)]
  pub indent: usize,

  /// Print the rewritten file to stdout instead of overwriting it
  #[arg(long)]
  pub stdout: bool,

  /// Fail (and leave the file untouched) when a call's parentheses never close
  #[arg(long)]
  pub strict: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub file: PathBuf,
  pub style: GuardStyle,
  pub mode: OutputMode,
  pub strict: bool,
}

/// Validate options and fold them into an `EffectiveConfig`.
///
/// The caller handles a missing file argument (usage) before calling this.
pub fn normalize(cli: Cli, file: PathBuf) -> Result<EffectiveConfig> {
  if cli.function.trim().is_empty() {
    bail!("--function must not be empty");
  }
  if cli.function.chars().any(char::is_whitespace) {
    bail!("--function must be a single identifier, got {:?}", cli.function);
  }
  // the opening brace is emitted by the inserter
  let guard = cli.guard.trim().trim_end_matches('{').trim_end().to_string();
  if guard.is_empty() {
    bail!("--guard must not be empty");
  }
  if cli.assert_prefix.trim().is_empty() {
    bail!("--assert-prefix must not be empty");
  }
  if cli.indent == 0 {
    bail!("--indent must be at least 1");
  }

  let style = GuardStyle {
    function: cli.function,
    guard,
    // compared against trimmed lines; trailing space is kept as a word boundary
    assert_prefix: cli.assert_prefix.trim_start().to_string(),
    indent_unit: " ".repeat(cli.indent),
  };

  let mode = if cli.stdout { OutputMode::Stdout } else { OutputMode::InPlace };

  Ok(EffectiveConfig { file, style, mode, strict: cli.strict })
}
