//! Configuration for chime.
//!
//! Two sources feed a hook run:
//! - `.claude/chime.yaml` (optional): lock timings, speech settings, and
//!   prompt block-list. Unknown fields are ignored and every field has a
//!   default, so an absent file means "all defaults".
//! - Process environment: read once into `HookEnv` at startup.

mod env;
mod model;
mod operations;
pub mod types;


// Re-export public API
pub use env::HookEnv;
pub use model::Config;
pub use types::BlockedPattern;
