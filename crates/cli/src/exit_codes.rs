//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — operator scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | recon            | Parsing / reconciliation conditions      |
//! | 10-19   | wikipedia        | Wikipedia API adapter                    |
//! | 20-29   | archive          | NYT Archive API adapter                  |
//! | 30-39   | store/output     | Citation store and file output           |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Recon (3-9)
// =============================================================================

/// Month or References section anchor missing from the article.
pub const EXIT_RECON_SECTION: u8 = 3;

/// Structural markup assumption violated (space-variant bullet, missing
/// day anchor). The source article must be fixed by hand.
pub const EXIT_RECON_MARKUP: u8 = 4;

/// Article contains a nested sub-list; list-level processing skipped
/// until a human edits it.
pub const EXIT_RECON_SUBLIST: u8 = 5;

/// The pass completed but produced date mismatches or notability-review
/// outcomes that need a human. Like `diff(1)`, nonzero means "look".
pub const EXIT_RECON_ATTENTION: u8 = 6;

// =============================================================================
// Wikipedia (10-19)
// =============================================================================

/// Requested article (or redirect) does not exist.
pub const EXIT_WIKI_NOT_FOUND: u8 = 10;

/// Rate limited after retries (429).
pub const EXIT_WIKI_RATE_LIMIT: u8 = 11;

/// Upstream error (4xx/5xx) or network failure after retries.
pub const EXIT_WIKI_UPSTREAM: u8 = 12;

// =============================================================================
// Archive (20-29)
// =============================================================================

/// No API key provided (neither flag nor env var).
pub const EXIT_ARCHIVE_NOT_AUTH: u8 = 20;

/// Auth rejected by upstream (401/403).
pub const EXIT_ARCHIVE_AUTH: u8 = 21;

/// Bad request rejected by upstream (400).
pub const EXIT_ARCHIVE_VALIDATION: u8 = 22;

/// Rate limited after retries (429).
pub const EXIT_ARCHIVE_RATE_LIMIT: u8 = 23;

/// Upstream error (5xx) or network failure after retries.
pub const EXIT_ARCHIVE_UPSTREAM: u8 = 24;

// =============================================================================
// Store / output (30-39)
// =============================================================================

/// Citation store error (cannot open, migrate, read, or write).
pub const EXIT_STORE: u8 = 30;

/// Cannot write the article text or CSV report.
pub const EXIT_OUTPUT_IO: u8 = 31;
