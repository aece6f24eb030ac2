//! CLI Exit Code Registry
//!
//! Single source of truth for `roster-sync` exit codes. Scripts that run the
//! sync unattended rely on them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success (roster written, or dry run completed)            |
//! | 1    | General error (unspecified)                               |
//! | 2    | Usage error (wrong argument count, bad flag value)        |
//! | 3    | Input error (report or roster unreadable or malformed)    |
//! | 4    | Config error (config file unreadable or invalid)          |
//! | 5    | Reconciliation error (an expected record was not found)   |
//! | 6    | Output error (roster could not be written)                |
//!
//! Nothing is written when any non-zero code is returned.

use roster_recon::RosterError;

/// Success.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - clap reports these itself with the same code.
pub const EXIT_USAGE: u8 = 2;

/// Report CSV or roster JSON missing, unreadable or malformed.
pub const EXIT_INPUT: u8 = 3;

/// Config file unreadable, unparsable or failing validation.
pub const EXIT_CONFIG: u8 = 4;

/// A rename or tag update targeted a record that was not there.
pub const EXIT_RECON: u8 = 5;

/// Roster document could not be written.
pub const EXIT_OUTPUT: u8 = 6;

/// Map a library error raised while loading inputs.
pub fn load_exit_code(err: &RosterError) -> u8 {
    match err {
        RosterError::ConfigParse(_) | RosterError::ConfigValidation(_) => EXIT_CONFIG,
        _ => EXIT_INPUT,
    }
}

/// Map a library error raised while reconciling.
pub fn run_exit_code(err: &RosterError) -> u8 {
    match err {
        RosterError::Io(_) | RosterError::Serialize(_) => EXIT_OUTPUT,
        _ => EXIT_RECON,
    }
}
