//! Plain-text report of how the solver sees one request, for bug reports.
//!
//! Shared by the CLI (`--explain`) and the WASM `get_debug_info` export.

use std::fmt::Write;

use crate::arithmetic::evaluate_equation;
use crate::board::{normalize_equation, Board};
use crate::lookup::PrecomputedTable;
use crate::slots::ALPHABET;
use crate::solver::SolveOptions;

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Describe `equation` under `options`: its normalized text, characters that cannot be drawn,
/// stick count, how it reads upside down, what the arithmetic makes of it, and whether
/// `table` would answer it.
pub fn explain(equation: &str, options: &SolveOptions, table: Option<&PrecomputedTable>) -> String {
    let mut report = String::new();
    let normalized = normalize_equation(equation);

    // writing to a String never fails
    let _ = writeln!(report, "matchstick {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));
    let _ = writeln!(report, "input: {equation:?} -> {normalized:?}");

    let unknown: Vec<String> = normalized
        .chars()
        .enumerate()
        .filter(|&(_, c)| !ALPHABET.contains(c))
        .map(|(position, c)| format!("{c:?} at {position}"))
        .collect();
    if unknown.is_empty() {
        let board = Board::from_equation(&normalized);
        let _ = writeln!(report, "board: {} cells, {} sticks", board.len(), board.matchstick_count());
        match board.flip().and_then(|turned| turned.to_equation()) {
            Ok(text) => {
                let _ = writeln!(report, "upside down: {:?}", normalize_equation(&text));
            }
            Err(e) => {
                let _ = writeln!(report, "upside down: {}", e.display_detailed());
            }
        }
    } else {
        let _ = writeln!(report, "cannot be drawn: {} (nothing to solve)", unknown.join(", "));
    }

    match evaluate_equation(&normalized) {
        Ok(true) => {
            let _ = writeln!(report, "arithmetic: already true (nothing to solve)");
        }
        Ok(false) => {
            let _ = writeln!(report, "arithmetic: false");
        }
        Err(e) => {
            let _ = writeln!(report, "arithmetic: {}", e.display_detailed());
        }
    }

    let _ = writeln!(
        report,
        "options: max moves {}, flip {}, prepend {}, append {}",
        options.max_moves,
        on_off(options.allow_flip),
        on_off(options.allow_prepend),
        on_off(options.allow_append)
    );

    let table_line = match table {
        None => "not loaded".to_string(),
        Some(table) if options.allow_prepend || options.allow_append => {
            format!("{} entries, bypassed (prepend/append)", table.len())
        }
        Some(table) => match table.lookup(&normalized, options.max_moves, options.allow_flip) {
            Some(hit) => format!("{} entries, hit ({} solutions)", table.len(), hit.len()),
            None => format!("{} entries, miss", table.len()),
        },
    };
    let _ = writeln!(report, "table: {table_line}");

    report
}
