//! Filesystem utilities for chime.
//!
//! Log files, session data, and lock records are rewritten by concurrent
//! hook processes, so every whole-file rewrite goes through `atomic_write`.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
