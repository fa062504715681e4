use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use std::time::Instant;

use matchstick::diagnostics::explain;
use matchstick::lookup::{LookupError, PrecomputedTable};
use matchstick::{matchstick_formatter, CachedSolver, SearchSolver, SolveOptions, SolveStrategy};

/// Matchstick equation solver
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// The equation to fix (e.g., "5+7=2")
    equation: String,

    /// Maximum number of matchsticks to move
    #[arg(short = 'm', long, default_value_t = 1)]
    max_moves: usize,

    /// Do not read the board upside down
    #[arg(long)]
    no_flip: bool,

    /// Allow building a new character in front of the equation
    #[arg(long)]
    prepend: bool,

    /// Allow building a new character after the equation
    #[arg(long)]
    append: bool,

    /// JSON table written by the `precompute` binary, consulted before searching
    #[arg(long, value_name = "PATH")]
    precomputed: Option<PathBuf>,

    /// Draw each solution as matchstick ASCII art
    #[arg(long)]
    ascii: bool,

    /// Print how the equation and options are understood instead of solving
    #[arg(long)]
    explain: bool,
}

/// Entry point of the matchstick CLI.
///
/// Delegates to [`try_main`], printing any error before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("MATCHSTICK_DEBUG").is_ok();
    matchstick::logging::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(lookup_err) = e.downcast_ref::<LookupError>() {
            eprintln!("Error: {}", lookup_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Solve the equation given on the command line; solutions go to stdout, the summary to stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let options = SolveOptions {
        max_moves: cli.max_moves,
        allow_flip: !cli.no_flip,
        allow_prepend: cli.prepend,
        allow_append: cli.append,
    };

    let table = cli.precomputed.as_ref().map(PrecomputedTable::load_from_path).transpose()?;

    if cli.explain {
        print!("{}", explain(&cli.equation, &options, table.as_ref()));
        return Ok(());
    }

    let t_solve = Instant::now();
    let solutions = match &table {
        Some(table) => CachedSolver::new(table).solve(&cli.equation, &options),
        None => SearchSolver.solve(&cli.equation, &options),
    };
    let solve_secs = t_solve.elapsed().as_secs_f64();

    for solution in &solutions {
        println!("{solution}");
        if cli.ascii {
            println!("{}\n", matchstick_formatter(&solution.equation));
        }
    }

    eprintln!(
        "{} solution{} with up to {} move{} in {:.3}s.",
        solutions.len(),
        if solutions.len() == 1 { "" } else { "s" },
        options.max_moves,
        if options.max_moves == 1 { "" } else { "s" },
        solve_secs
    );

    Ok(())
}
