//! Announcement phrases.
//!
//! Each lifecycle event has a fixed pool of short phrases; one is picked at
//! random per announcement. When an engineer name is configured, a share of
//! announcements address them directly: `"Sam, all done!"`.

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

pub const SUBAGENT_COMPLETE: &[&str] = &[
    "Subagent wrapped up its work.",
    "Subagent task is done.",
    "Your subagent just finished up.",
    "That subtask is taken care of.",
    "Subagent reporting in, task complete.",
    "Another subtask checked off.",
    "Subagent finished and ready to go.",
    "Subtask done, moving right along.",
    "Your subagent came through.",
    "That piece of work is all set.",
];

pub const AGENT_COMPLETE: &[&str] = &[
    "All done!",
    "Work complete!",
    "Task finished!",
    "Ready for your next move!",
    "Job done!",
    "That's a wrap!",
    "Finished up!",
    "All set!",
    "Done and dusted!",
    "Ready when you are!",
];

pub const INPUT_NEEDED: &[&str] = &[
    "Your agent needs your input.",
    "Waiting on you for the next step.",
    "Input needed to keep going.",
    "Your agent has a question for you.",
    "Quick input needed over here.",
    "Paused and waiting for your call.",
    "Need your direction to continue.",
    "Standing by for your input.",
    "Your agent is waiting on you.",
    "A decision is needed to proceed.",
];

pub const SESSION_STARTUP: &[&str] = &[
    "Claude Code session started.",
    "Session is up and running.",
    "Ready to go!",
    "New session, let's get to work.",
    "Session started, standing by.",
    "Fired up and ready.",
    "Online and awaiting instructions.",
    "Session initialized, let's do this.",
    "Good to go!",
    "New session is live.",
];

pub const SESSION_RESUME: &[&str] = &[
    "Resuming previous session.",
    "Picking up where we left off.",
    "Back at it!",
    "Session resumed, ready to continue.",
    "Continuing from last time.",
    "Welcome back!",
    "Resuming your session now.",
    "Right where we left off.",
    "Session restored, let's keep going.",
    "Back in action!",
];

pub const SESSION_CLEAR: &[&str] = &[
    "Starting fresh session.",
    "Clean slate, let's go.",
    "Fresh start!",
    "New session, new beginning.",
    "All cleared, starting fresh.",
    "Fresh session, ready to roll.",
    "Starting over with a clean slate.",
    "Cleared and ready.",
    "Brand new session!",
    "Starting from scratch.",
];

pub const SESSION_COMPACT: &[&str] = &[
    "Context compacted, carrying on.",
    "Compacted and ready to continue.",
    "Slimmed things down, nothing lost.",
    "Compacted the conversation.",
    "Context compacted, staying focused.",
    "Compacted and good to go.",
    "Context trimmed.",
];

pub const FEATURE_COMPLETE: &[&str] = &[
    "Feature spec is written up.",
    "Feature writer is done.",
    "The feature plan is ready for review.",
    "Feature drafted and ready.",
    "Feature writeup complete.",
];

pub const CODER_COMPLETE: &[&str] = &[
    "Coder finished the implementation.",
    "Code is written and ready.",
    "Coder agent is done.",
    "Implementation complete.",
    "The code changes are in.",
];

pub const REVIEWER_COMPLETE: &[&str] = &[
    "Review is complete.",
    "Reviewer has finished.",
    "Code review is done.",
    "Reviewer signed off on its pass.",
    "Review notes are ready.",
];

pub const DOCUMENTATION_COMPLETE: &[&str] = &[
    "Documentation is updated.",
    "Docs are written.",
    "Documentation agent is done.",
    "The docs are ready.",
    "Documentation pass complete.",
];

/// Agent roles that announce their own completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRole {
    Feature,
    Coder,
    Reviewer,
    Document,
}

impl AgentRole {
    /// Parse an `--agent` value. Unknown roles are not announced.
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "feature" => Some(AgentRole::Feature),
            "coder" => Some(AgentRole::Coder),
            "reviewer" => Some(AgentRole::Reviewer),
            "document" => Some(AgentRole::Document),
            _ => None,
        }
    }

    fn pool(self) -> &'static [&'static str] {
        match self {
            AgentRole::Feature => FEATURE_COMPLETE,
            AgentRole::Coder => CODER_COMPLETE,
            AgentRole::Reviewer => REVIEWER_COMPLETE,
            AgentRole::Document => DOCUMENTATION_COMPLETE,
        }
    }
}

/// Why a session started, as reported in the `source` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Startup,
    Resume,
    Clear,
    Compact,
}

impl SessionSource {
    /// Parse a `source` value. Unrecognized values count as a fresh startup.
    pub fn parse(source: &str) -> Self {
        match source {
            "resume" => SessionSource::Resume,
            "clear" => SessionSource::Clear,
            "compact" => SessionSource::Compact,
            _ => SessionSource::Startup,
        }
    }

    fn pool(self) -> &'static [&'static str] {
        match self {
            SessionSource::Startup => SESSION_STARTUP,
            SessionSource::Resume => SESSION_RESUME,
            SessionSource::Clear => SESSION_CLEAR,
            SessionSource::Compact => SESSION_COMPACT,
        }
    }
}

/// Picks announcement phrases.
///
/// Generic over the RNG so tests can use a seeded one.
#[derive(Debug)]
pub struct MessagePicker<R = ThreadRng> {
    rng: R,
    engineer_name: Option<String>,
    name_probability: f64,
}

impl MessagePicker<ThreadRng> {
    /// A picker backed by the thread-local RNG.
    pub fn new(engineer_name: Option<String>, name_probability: f64) -> Self {
        Self::with_rng(rand::thread_rng(), engineer_name, name_probability)
    }
}

impl<R: Rng> MessagePicker<R> {
    /// A picker drawing from `rng`.
    ///
    /// A blank name disables personalization. A probability outside
    /// `0.0..=1.0` (including NaN) is treated as 0.
    pub fn with_rng(rng: R, engineer_name: Option<String>, name_probability: f64) -> Self {
        let engineer_name = engineer_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let name_probability = if (0.0..=1.0).contains(&name_probability) {
            name_probability
        } else {
            0.0
        };

        Self {
            rng,
            engineer_name,
            name_probability,
        }
    }

    pub fn subagent_complete(&mut self) -> String {
        self.compose(SUBAGENT_COMPLETE)
    }

    pub fn agent_complete(&mut self) -> String {
        self.compose(AGENT_COMPLETE)
    }

    pub fn input_needed(&mut self) -> String {
        self.compose(INPUT_NEEDED)
    }

    /// Greeting for a session start with the given `source` field.
    pub fn session_start(&mut self, source: &str) -> String {
        self.compose(SessionSource::parse(source).pool())
    }

    pub fn role_complete(&mut self, role: AgentRole) -> String {
        self.compose(role.pool())
    }

    fn compose(&mut self, pool: &[&str]) -> String {
        let message = pool.choose(&mut self.rng).copied().unwrap_or_default();

        match &self.engineer_name {
            Some(name) if self.rng.gen_bool(self.name_probability) => {
                format!("{}, {}", name, message.to_lowercase())
            }
            _ => message.to_string(),
        }
    }
}
