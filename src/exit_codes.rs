//! Exit code constants for the paralix CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid placeholder argument, invalid config)
//! - 2: One or more execution units failed (the report is still written)
//! - 3: Filesystem failure (input file, scratch area, output file)

/// Successful execution: every unit exited zero and the report was written.
pub const SUCCESS: i32 = 0;

/// User error: conflicting inputs, malformed or unmatched placeholders, bad config.
pub const USER_ERROR: i32 = 1;

/// At least one execution unit could not launch or exited non-zero.
pub const UNIT_FAILURE: i32 = 2;

/// Reading the input file or writing the scratch area / output file failed.
pub const IO_FAILURE: i32 = 3;
