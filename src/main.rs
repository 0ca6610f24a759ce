use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod guard;
mod rewrite;
mod util;

use crate::cli::{Cli, USAGE, normalize};
use crate::guard::GuardInserter;
use crate::rewrite::{OutputMode, rewrite_file};

fn main() -> Result<()> {
  let mut cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  let Some(file) = cli.file.take() else {
    println!("{}", USAGE);
    std::process::exit(1);
  };

  util::init_logging();

  // Phase 1: normalize CLI
  let cfg = normalize(cli, file)?;

  // Phase 2: rewrite the one file
  let inserter = GuardInserter::new(cfg.style.clone())?;
  let outcome = rewrite_file(&cfg.file, &inserter, cfg.mode, cfg.strict)?;

  if cfg.mode == OutputMode::InPlace {
    if !outcome.written {
      info!(skipped = outcome.summary.skipped, "nothing to wrap; file left untouched");
    }
    println!("✅ Wrapped {} calls in {}", cfg.style.function, cfg.file.display());
  }

  Ok(())
}
