//! CLI Exit Code Registry
//!
//! Single source of truth for `stockcount` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad arguments, unknown column name)     |
//! | 3    | Malformed CSV (ragged rows, undecodable bytes)       |
//! | 4    | Required column missing from an input                |
//! | 5    | Bad quantity cell, or a quantity total overflows     |
//! | 6    | Config file invalid                                  |
//! | 7    | File could not be read                               |
//!
//! Duplicate keys are not an error: they are dropped and reported.

use stockcount_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown column names.
pub const EXIT_USAGE: u8 = 2;

/// Malformed CSV input.
pub const EXIT_PARSE: u8 = 3;

/// Missing required column.
pub const EXIT_SCHEMA: u8 = 4;

/// Unparseable quantity.
pub const EXIT_QUANTITY: u8 = 5;

/// Invalid config file.
pub const EXIT_CONFIG: u8 = 6;

/// Input file unreadable.
pub const EXIT_IO: u8 = 7;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::Parse { .. } => EXIT_PARSE,
        ReconError::MissingColumn { .. } => EXIT_SCHEMA,
        ReconError::QuantityParse { .. } | ReconError::TotalOverflow(_) => EXIT_QUANTITY,
        ReconError::ConfigParse(_) => EXIT_CONFIG,
        ReconError::ConfigValidation(_) | ReconError::DisplayNotGrouped(_) => EXIT_USAGE,
        ReconError::Io(_) => EXIT_IO,
    }
}
