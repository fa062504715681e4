// Reusable library API, shared by the CLI and WASM builds
pub mod arithmetic;
pub mod board;
pub mod diagnostics;
pub mod errors;
pub mod formatter;
pub mod logging;
pub mod lookup;
pub mod moves;
pub mod search;
pub mod slots;
pub mod solver;

pub use formatter::matchstick_formatter;
pub use lookup::{CachedSolver, PrecomputedTable};
pub use solver::{solve, SearchSolver, Solution, SolveOptions, SolveStrategy};

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
