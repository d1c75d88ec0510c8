//! Exit code constants for the chime CLI.
//!
//! Hook commands are fail-open, so most runs end with `SUCCESS` even when
//! something went wrong internally:
//! - 0: Success (or an absorbed hook failure)
//! - 1: User error (bad args, invalid state)
//! - 2: Blocked (the agent runtime treats exit 2 as "deny this action")
//! - 4: Lock acquisition timed out (`chime lock acquire` only)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The hook refused the action; stderr carries the reason back to the agent.
pub const BLOCKED: i32 = 2;

/// Lock acquisition failure: the lock could not be acquired before the timeout.
pub const LOCK_FAILURE: i32 = 4;
