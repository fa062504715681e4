use std::sync::OnceLock;

use wasm_bindgen::prelude::*;

use crate::diagnostics::explain;
use crate::formatter::matchstick_formatter;
use crate::logging::init_logger;
use crate::lookup::{CachedSolver, LookupError, PrecomputedTable};
use crate::slots::{recognize_character, Slots};
use crate::solver::{SearchSolver, SolveOptions, SolveStrategy};

/// Answer table shared by every call; loaded at most once, before the first solve that uses it.
static PRECOMPUTED: OnceLock<PrecomputedTable> = OnceLock::new();

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "L002", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<LookupError> for WasmError {
    fn from(e: LookupError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

/// Initialize logging and the glyph tables.
///
/// Call once from JavaScript after the module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();

    // build the recognition table now rather than on the first solve
    let _ = recognize_character(Slots::EMPTY);

    init_logger(debug_enabled);

    log::info!("WASM module initialized");
}

/// JS entry: returns `Solution[]` (`{ equation, moves: [{ fromChar, fromBit, toChar, toBit }], flipped }`).
///
/// Uses the precomputed table when one has been loaded.
#[wasm_bindgen]
pub fn solve_equation_wasm(
    equation: &str,
    max_moves: usize,
    allow_flip: bool,
    allow_prepend: bool,
    allow_append: bool,
) -> Result<JsValue, JsValue> {
    let options = SolveOptions { max_moves, allow_flip, allow_prepend, allow_append };

    let solutions = match PRECOMPUTED.get() {
        Some(table) => CachedSolver::new(table).solve(equation, &options),
        None => SearchSolver.solve(equation, &options),
    };

    serde_wasm_bindgen::to_value(&solutions).map_err(|e| {
        WasmError {
            code: "WASM001".to_string(),
            message: format!("serialization failed: {e}"),
            description: "Failed to serialize solutions".to_string(),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
        .into()
    })
}

/// JS entry: three-line ASCII rendering of `equation`.
#[wasm_bindgen]
pub fn format_equation_wasm(equation: &str) -> String {
    matchstick_formatter(equation)
}

/// Load the precomputed answer table (JSON as written by the `precompute` binary).
///
/// Returns the number of entries. A table can only be loaded once per module instance.
#[wasm_bindgen]
pub fn load_precomputed(json: &str) -> Result<usize, JsValue> {
    if PRECOMPUTED.get().is_some() {
        return Err(already_loaded().into());
    }
    let table = PrecomputedTable::from_json(json).map_err(WasmError::from)?;
    let len = table.len();
    PRECOMPUTED.set(table).map_err(|_| already_loaded())?;
    log::info!("precomputed table loaded ({len} entries)");
    Ok(len)
}

fn already_loaded() -> WasmError {
    WasmError {
        code: "WASM002".to_string(),
        message: "precomputed table already loaded".to_string(),
        description: "Table already loaded".to_string(),
        help: Some("Load the table once, right after initialize()".to_string()),
    }
}

/// Report of how this module sees a request (normalized input, undrawable characters,
/// rotation, arithmetic, options and table status) for users to paste into bug reports.
#[wasm_bindgen]
pub fn get_debug_info(
    equation: &str,
    max_moves: usize,
    allow_flip: bool,
    allow_prepend: bool,
    allow_append: bool,
) -> String {
    let options = SolveOptions { max_moves, allow_flip, allow_prepend, allow_append };
    explain(equation, &options, PRECOMPUTED.get())
}
