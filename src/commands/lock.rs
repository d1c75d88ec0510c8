//! Implementation of the `chime lock` subcommands.
//!
//! Operator access to the announcement lock: inspect it, sweep it, or hold
//! it from a shell script to silence announcements for a while.

use super::HookRuntime;
use crate::cli::{LockAcquireArgs, LockAction, LockCleanupArgs, LockCommand, LockReleaseArgs};
use crate::error::{ChimeError, Result};
use crate::locks::{CleanupOutcome, LockStatus, format_age};
use std::time::Duration;

/// Dispatch lock subcommands.
pub fn dispatch_lock(rt: &HookRuntime<'_>, lock_cmd: LockCommand) -> Result<()> {
    let name = lock_cmd.name.as_deref();
    match lock_cmd.action {
        LockAction::Acquire(args) => cmd_lock_acquire(rt, name, args),
        LockAction::Release(args) => cmd_lock_release(rt, name, args),
        LockAction::Cleanup(args) => cmd_lock_cleanup(rt, name, args),
        LockAction::Status => cmd_lock_status(rt, name),
    }
}

fn cmd_lock_acquire(
    rt: &HookRuntime<'_>,
    name: Option<&str>,
    args: LockAcquireArgs,
) -> Result<()> {
    let manager = rt.lock_manager(name);
    let owner = args.owner.unwrap_or_else(get_owner_string);
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| rt.config.lock_timeout());

    if !manager.acquire(&owner, timeout) {
        return Err(ChimeError::LockError(format!(
            "lock '{}' is still held after {}s.\n\n\
             Run `chime lock status` to see the holder.",
            manager.resource().name(),
            timeout.as_secs()
        )));
    }

    println!("Acquired lock '{}' as {}", manager.resource().name(), owner);
    println!(
        "Note: the recorded process exits now, so the lock is reclaimable after {}s.",
        rt.config.lock_stale_secs
    );
    Ok(())
}

fn cmd_lock_release(
    rt: &HookRuntime<'_>,
    name: Option<&str>,
    args: LockReleaseArgs,
) -> Result<()> {
    let manager = rt.lock_manager(name);
    let owner = args.owner.unwrap_or_else(get_owner_string);
    manager.release(&owner);
    println!("Released lock '{}'", manager.resource().name());
    Ok(())
}

fn cmd_lock_cleanup(
    rt: &HookRuntime<'_>,
    name: Option<&str>,
    args: LockCleanupArgs,
) -> Result<()> {
    let manager = rt.lock_manager(name);
    let max_age = args
        .max_age
        .map(Duration::from_secs)
        .unwrap_or_else(|| rt.config.lock_stale_after());

    let outcome = manager.cleanup_stale(max_age);
    println!("{}", describe_cleanup(manager.resource().name(), &outcome));
    Ok(())
}

fn cmd_lock_status(rt: &HookRuntime<'_>, name: Option<&str>) -> Result<()> {
    let status = rt.lock_manager(name).status();
    print!("{}", render_status(&status, rt.config.lock_stale_after()));
    Ok(())
}

/// One-line summary of a cleanup sweep.
pub fn describe_cleanup(name: &str, outcome: &CleanupOutcome) -> String {
    match outcome {
        CleanupOutcome::NoRecord => format!("Lock '{}': no record, nothing to clean", name),
        CleanupOutcome::Fresh { age } => {
            format!("Lock '{}': record is {} old, not stale", name, format_age(*age))
        }
        CleanupOutcome::OwnerRunning { pid, state } => format!(
            "Lock '{}': stale, but owner pid {} may still be running ({:?}); kept",
            name, pid, state
        ),
        CleanupOutcome::Superseded => {
            format!("Lock '{}': record changed during the sweep; kept", name)
        }
        CleanupOutcome::Reclaimed { age } => {
            format!("Lock '{}': reclaimed stale lock ({} old)", name, format_age(*age))
        }
    }
}

/// Multi-line status block.
pub fn render_status(status: &LockStatus, stale_after: Duration) -> String {
    let mut out = String::new();

    if !status.held {
        out.push_str(&format!("Lock '{}': free\n", status.name));
        return out;
    }

    out.push_str(&format!("Lock '{}': held\n", status.name));
    match &status.record {
        Some(record) => {
            out.push_str(&format!("  Owner:      {}\n", record.owner_id));
            out.push_str(&format!("  PID:        {}\n", record.pid));
            out.push_str(&format!(
                "  Since:      {}\n",
                record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        None => out.push_str("  Owner:      unknown (no readable record)\n"),
    }
    if let Some(age) = status.age {
        out.push_str(&format!("  Age:        {}\n", format_age(age)));
        if age > stale_after {
            out.push_str(&format!(
                "  Status:     STALE (exceeds {}s threshold)\n",
                stale_after.as_secs()
            ));
        }
    }

    out
}

/// Default owner id for operator commands: `user@host`.
fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
