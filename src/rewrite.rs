// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Read one source file, run the guard inserter over it, and write the result back (or preview it)
// role: processing/orchestrator
// inputs: File path, GuardInserter, OutputMode, strict flag
// outputs: RewriteOutcome (summary + whether the file was written); transformed text on stdout in preview mode
// side_effects: Reads the file; overwrites it in place when content changed (InPlace mode); prints in Stdout mode
// invariants:
// - The file is written at most once, with the full transformed content
// - Unchanged content is never written back
// - strict ⇒ an unterminated call aborts before any write
// errors: Read/write errors carry the file path as context; strict failures name the starting line
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::guard::{GuardInserter, WrapSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
  /// Overwrite the input file.
  InPlace,
  /// Print the rewritten text; leave the file alone.
  Stdout,
}

#[derive(Debug, Clone)]
pub struct RewriteOutcome {
  pub summary: WrapSummary,
  pub written: bool,
}

/// Rewrite the file at `path`, printing to `sink` in `OutputMode::Stdout`.
pub fn rewrite_file_to<W: Write>(
  path: &Path,
  inserter: &GuardInserter,
  mode: OutputMode,
  strict: bool,
  sink: &mut W,
) -> Result<RewriteOutcome> {
  let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
  let wrapped = inserter.wrap(&content);

  if strict {
    if let Some(site) = wrapped.summary.unterminated() {
      bail!(
        "{}:{}: {}( call never closes before end of file",
        path.display(),
        site.line_number(),
        inserter.style().function
      );
    }
  }

  info!(
    path = %path.display(),
    wrapped = wrapped.summary.wrapped.len(),
    skipped = wrapped.summary.skipped,
    "scanned file"
  );

  let written = match mode {
    OutputMode::Stdout => {
      sink
        .write_all(wrapped.text.as_bytes())
        .context("writing rewritten text to stdout")?;
      false
    }
    OutputMode::InPlace if wrapped.changed() => {
      std::fs::write(path, wrapped.text.as_bytes()).with_context(|| format!("writing {}", path.display()))?;
      true
    }
    OutputMode::InPlace => false,
  };

  Ok(RewriteOutcome { summary: wrapped.summary, written })
}

/// Rewrite the file at `path`; preview output goes to the process stdout.
pub fn rewrite_file(path: &Path, inserter: &GuardInserter, mode: OutputMode, strict: bool) -> Result<RewriteOutcome> {
  let stdout = std::io::stdout();
  let mut lock = stdout.lock();
  rewrite_file_to(path, inserter, mode, strict, &mut lock)
}
