//! Precomputed answers, used as a cache in front of the search.
//!
//! A table maps `(equation, max_moves, allow_flip)` to the exact solution list `solve` returns
//! for it. Tables are built by running the search (see the `precompute` binary) and shipped as
//! JSON. Requests with prepend or append turned on are never cached.

use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::normalize_equation;
use crate::errors::format_error_with_code_and_help;
use crate::solver::{solve, SearchSolver, Solution, SolveOptions, SolveStrategy};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("cannot read table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table lists \"{equation}\" (max moves {max_moves}, flip {allow_flip}) more than once")]
    DuplicateEntry { equation: String, max_moves: usize, allow_flip: bool },
}

impl LookupError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::Io(_) => "L001",
            LookupError::Json(_) => "L002",
            LookupError::DuplicateEntry { .. } => "L003",
        }
    }

    /// Returns a short description of this error type
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            LookupError::Io(_) => "Table not readable",
            LookupError::Json(_) => "Table not valid JSON",
            LookupError::DuplicateEntry { .. } => "Duplicate table entry",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            LookupError::Io(_) => Some("Check the path passed to --precomputed"),
            LookupError::Json(_) => Some("Regenerate the table with the `precompute` binary"),
            LookupError::DuplicateEntry { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// One row of the serialized table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEntry {
    pub equation: String,
    pub max_moves: usize,
    pub allow_flip: bool,
    pub solutions: Vec<Solution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct TableKey {
    equation: String,
    max_moves: usize,
    allow_flip: bool,
}

impl TableKey {
    fn new(equation: &str, max_moves: usize, allow_flip: bool) -> TableKey {
        TableKey { equation: normalize_equation(equation), max_moves, allow_flip }
    }
}

/// Immutable answer table. Safe to share between threads once built.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedTable {
    entries: HashMap<TableKey, Vec<Solution>>,
}

impl PrecomputedTable {
    /// # Errors
    /// [`LookupError::DuplicateEntry`] if two rows share a key after normalization.
    pub fn from_entries(rows: impl IntoIterator<Item = TableEntry>) -> Result<PrecomputedTable, LookupError> {
        let mut entries = HashMap::new();
        for row in rows {
            let key = TableKey::new(&row.equation, row.max_moves, row.allow_flip);
            if entries.contains_key(&key) {
                return Err(LookupError::DuplicateEntry {
                    equation: key.equation,
                    max_moves: key.max_moves,
                    allow_flip: key.allow_flip,
                });
            }
            entries.insert(key, row.solutions);
        }
        Ok(PrecomputedTable { entries })
    }

    /// # Errors
    /// [`LookupError::Json`] for malformed input, or a duplicate row.
    pub fn from_json(json: &str) -> Result<PrecomputedTable, LookupError> {
        let rows: Vec<TableEntry> = serde_json::from_str(json)?;
        let table = PrecomputedTable::from_entries(rows)?;
        debug!("loaded {} precomputed entries", table.len());
        Ok(table)
    }

    /// # Errors
    /// [`LookupError::Io`] if the file cannot be read, otherwise as [`Self::from_json`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<PrecomputedTable, LookupError> {
        let json = std::fs::read_to_string(path)?;
        PrecomputedTable::from_json(&json)
    }

    /// Serialize with rows sorted by key, so equal tables give equal text.
    ///
    /// # Errors
    /// [`LookupError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, LookupError> {
        let mut keys: Vec<&TableKey> = self.entries.keys().collect();
        keys.sort();
        let rows: Vec<TableEntry> = keys
            .into_iter()
            .map(|key| TableEntry {
                equation: key.equation.clone(),
                max_moves: key.max_moves,
                allow_flip: key.allow_flip,
                solutions: self.entries[key].clone(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    /// Solve every equation with the search engine and record the answers.
    /// Equations that normalize to one already solved are skipped.
    pub fn build<'e>(equations: impl IntoIterator<Item = &'e str>, max_moves: usize, allow_flip: bool) -> PrecomputedTable {
        let options = SolveOptions { max_moves, allow_flip, ..SolveOptions::default() };
        let mut entries = HashMap::new();
        for equation in equations {
            let key = TableKey::new(equation, max_moves, allow_flip);
            if key.equation.is_empty() || entries.contains_key(&key) {
                continue;
            }
            let solutions = solve(&key.equation, &options);
            debug!("precomputed \"{}\": {} solutions", key.equation, solutions.len());
            entries.insert(key, solutions);
        }
        PrecomputedTable { entries }
    }

    pub fn lookup(&self, equation: &str, max_moves: usize, allow_flip: bool) -> Option<&[Solution]> {
        self.entries.get(&TableKey::new(equation, max_moves, allow_flip)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Answers from a [`PrecomputedTable`] when it has them, from the search otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CachedSolver<'a> {
    table: &'a PrecomputedTable,
    fallback: SearchSolver,
}

impl<'a> CachedSolver<'a> {
    pub fn new(table: &'a PrecomputedTable) -> CachedSolver<'a> {
        CachedSolver { table, fallback: SearchSolver }
    }
}

impl SolveStrategy for CachedSolver<'_> {
    fn solve(&self, equation: &str, options: &SolveOptions) -> Vec<Solution> {
        if !options.allow_prepend && !options.allow_append {
            if let Some(hit) = self.table.lookup(equation, options.max_moves, options.allow_flip) {
                debug!("table hit for \"{equation}\"");
                return hit.to_vec();
            }
        }
        debug!("table miss for \"{equation}\", searching");
        self.fallback.solve(equation, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake(equation: &str) -> Vec<Solution> {
        vec![Solution { equation: equation.to_string(), moves: vec![], flipped: false }]
    }

    fn row(equation: &str, max_moves: usize, allow_flip: bool, answer: &str) -> TableEntry {
        TableEntry { equation: equation.to_string(), max_moves, allow_flip, solutions: fake(answer) }
    }

    #[test]
    fn test_lookup_normalizes_and_keys_on_options() {
        let table = PrecomputedTable::from_entries(vec![row("1+1=3", 1, true, "A=A")]).unwrap();
        assert_eq!(Some(fake("A=A").as_slice()), table.lookup(" 1 + 1 = 3 ", 1, true));
        assert_eq!(None, table.lookup("1+1=3", 2, true));
        assert_eq!(None, table.lookup("1+1=3", 1, false));
    }

    #[test]
    fn test_duplicate_rows_rejected() {
        let err = PrecomputedTable::from_entries(vec![row("3*3=6", 1, true, "a"), row("3x3=6", 1, true, "b")]).unwrap_err();
        assert_eq!("L003", err.code());
        assert!(err.to_string().contains("3x3=6"));
    }

    #[test]
    fn test_json_round_trip() {
        let table = PrecomputedTable::build(["1+1=3", "5+7=2", "1+1=3"], 1, true);
        assert_eq!(2, table.len());
        let json = table.to_json().unwrap();
        let reloaded = PrecomputedTable::from_json(&json).unwrap();
        assert_eq!(table.lookup("5+7=2", 1, true), reloaded.lookup("5+7=2", 1, true));
        assert_eq!(json, reloaded.to_json().unwrap());
    }

    #[test]
    fn test_built_entries_match_search() {
        let table = PrecomputedTable::build(["7+7=0"], 1, false);
        let options = SolveOptions { allow_flip: false, ..SolveOptions::default() };
        assert_eq!(Some(solve("7+7=0", &options).as_slice()), table.lookup("7+7=0", 1, false));
    }

    #[test]
    fn test_bad_json() {
        let err = PrecomputedTable::from_json("{not json").unwrap_err();
        assert_eq!("L002", err.code());
        assert!(err.display_detailed().contains("precompute"));
    }

    #[test]
    fn test_missing_file() {
        let err = PrecomputedTable::load_from_path("/nonexistent/matchstick/table.json").unwrap_err();
        assert_eq!("L001", err.code());
    }

    #[test]
    fn test_cached_solver_hit_and_fallback() {
        let table = PrecomputedTable::from_entries(vec![row("1+1=3", 1, true, "cached")]).unwrap();
        let solver = CachedSolver::new(&table);
        let opts = SolveOptions::default();

        assert_eq!(fake("cached"), solver.solve("1+1=3", &opts));

        // padded searches bypass the table
        let padded = SolveOptions { allow_prepend: true, ..opts };
        assert_eq!(solve("1+1=3", &padded), solver.solve("1+1=3", &padded));

        assert_eq!(solve("5+7=2", &opts), solver.solve("5+7=2", &opts));
    }
}
