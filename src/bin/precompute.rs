//! `precompute`: build a JSON answer table for `--precomputed` and `load_precomputed`.
//!
//! Reads one equation per line (from FILE, or stdin when no file is given), solves each with
//! the search engine and prints the table on stdout. Blank lines and lines starting with `#`
//! are skipped.
//!
//! - `cargo run --release --bin precompute -- puzzles.txt -m 2 > table.json`

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use std::time::Instant;

use matchstick::lookup::PrecomputedTable;

#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// File with one equation per line (stdin if omitted)
    file: Option<PathBuf>,

    /// Move budget the table is built for
    #[arg(short = 'm', long, default_value_t = 1)]
    max_moves: usize,

    /// Build the table without upside-down readings
    #[arg(long)]
    no_flip: bool,
}

fn main() -> ExitCode {
    let debug_enabled = std::env::var("MATCHSTICK_DEBUG").is_ok();
    matchstick::logging::init_logger(debug_enabled);

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let text = match &cli.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let equations = text.lines().map(str::trim).filter(|line| !line.is_empty() && !line.starts_with('#'));

    let started = Instant::now();
    let table = PrecomputedTable::build(equations, cli.max_moves, !cli.no_flip);
    println!("{}", table.to_json()?);

    eprintln!("{} entries in {:.3}s.", table.len(), started.elapsed().as_secs_f64());
    Ok(())
}
