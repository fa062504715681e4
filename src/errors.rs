//! Error types for board decoding and equation evaluation, with error codes and help text.
//!
//! # Error Codes
//!
//! - B001: `BoardError::Unrecognizable` (A cell draws no known character)
//! - B002: `BoardError::Unflippable` (A cell cannot be rotated 180°)
//! - A001: `EquationError::MissingEquals` (No `=` in the equation)
//! - A002: `EquationError::ExtraEquals` (More than one `=`)
//! - A003: `EquationError::Syntax` (Side is not a well-formed expression)
//! - A004: `EquationError::LeadingZero` (Multi-digit number starting with `0`)
//! - A005: `EquationError::DoubledSign` (`--` or `++`)
//! - A006: `EquationError::DivisionByZero`
//! - A007: `EquationError::Overflow` (Value outside the exact arithmetic range)
//! - A008: `EquationError::NomError` (Low-level nom parser error)
//! - L001-L003: [`crate::lookup::LookupError`] (precomputed table I/O, JSON, duplicates)
//!
//! None of these reach the caller of [`crate::solver::solve`]: the solver discards the
//! candidate that produced them. They are public so that the lower-level APIs
//! ([`crate::board`], [`crate::arithmetic`]) can say *why* something was rejected.
//!
//! # Examples
//!
//! ```
//! use matchstick::board::Board;
//! use matchstick::errors::BoardError;
//!
//! let board = Board::from_equation("8/2=4");
//! match board.flip() {
//!     Err(e @ BoardError::Unflippable { .. }) => {
//!         assert_eq!("B002", e.code());
//!         println!("{}", e.display_detailed());
//!     }
//!     other => panic!("expected an unflippable board, got {other:?}"),
//! }
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};

/// Why a board could not be read or rotated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell {position} does not draw a known character (slots {bits:#015b})")]
    Unrecognizable { position: usize, bits: u16 },

    #[error("cell {position} cannot be rotated 180°")]
    Unflippable { position: usize },
}

impl BoardError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::Unrecognizable { .. } => "B001",
            BoardError::Unflippable { .. } => "B002",
        }
    }

    /// Returns a short description of this error type
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            BoardError::Unrecognizable { .. } => "Unrecognizable board",
            BoardError::Unflippable { .. } => "Unflippable board",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            BoardError::Unrecognizable { .. } => {
                Some("Only the digits 0-9, '+', '-', 'x', '/', '=' and blanks can be drawn")
            }
            BoardError::Unflippable { .. } => {
                Some("Division strokes have no upside-down counterpart; remove '/' to allow rotation")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Why an equation string is not a true equation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EquationError {
    #[error("equation has no '='")]
    MissingEquals,

    #[error("equation has more than one '='")]
    ExtraEquals,

    #[error("malformed expression near \"{rest}\"")]
    Syntax { rest: String },

    #[error("number \"{number}\" has a leading zero")]
    LeadingZero { number: String },

    #[error("doubled sign '{sign}{sign}'")]
    DoubledSign { sign: char },

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl<'a> NomParseError<&'a str> for Box<EquationError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(EquationError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl EquationError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            EquationError::MissingEquals => "A001",
            EquationError::ExtraEquals => "A002",
            EquationError::Syntax { .. } => "A003",
            EquationError::LeadingZero { .. } => "A004",
            EquationError::DoubledSign { .. } => "A005",
            EquationError::DivisionByZero => "A006",
            EquationError::Overflow => "A007",
            EquationError::NomError(_) => "A008",
        }
    }

    /// Returns a short description of this error type
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            EquationError::MissingEquals => "Equation has no '='",
            EquationError::ExtraEquals => "Equation has several '='",
            EquationError::Syntax { .. } => "Malformed expression",
            EquationError::LeadingZero { .. } => "Number with a leading zero",
            EquationError::DoubledSign { .. } => "Doubled sign",
            EquationError::DivisionByZero => "Division by zero",
            EquationError::Overflow => "Arithmetic overflow",
            EquationError::NomError(_) => "Low-level parser error",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            EquationError::MissingEquals | EquationError::ExtraEquals => {
                Some("An equation needs exactly one '=' between two expressions, e.g. '1+1=2'")
            }
            EquationError::LeadingZero { .. } => Some("Write numbers without leading zeros ('7', not '07')"),
            EquationError::DoubledSign { .. } => Some("Use a single sign between terms, e.g. '5-2' or '5+-2'"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
