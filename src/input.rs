//! Hook event payloads.
//!
//! The runtime writes one JSON object to a hook's stdin. Its shape differs
//! per event and grows over time, so the payload is kept as a raw
//! [`Value`] (logged verbatim) with typed accessors for the fields chime
//! actually reads.

use crate::error::{ChimeError, Result};
use serde_json::{Map, Value};
use std::io::Read;

/// Identifier used when the payload carries none.
pub const UNKNOWN_ID: &str = "unknown";

/// A parsed hook event.
#[derive(Debug, Clone, PartialEq)]
pub struct HookInput {
    raw: Value,
}

impl HookInput {
    /// Read and parse the whole of `reader`.
    ///
    /// # Returns
    ///
    /// * `Ok(HookInput)` - The payload parsed as JSON
    /// * `Err(ChimeError::InputError)` - Empty input, a read failure, or invalid JSON
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| ChimeError::InputError(format!("failed to read stdin: {}", e)))?;
        Self::parse(&content)
    }

    /// Parse a payload from a string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(ChimeError::InputError("empty input".to_string()));
        }

        let raw = serde_json::from_str(content).map_err(|e| ChimeError::InputError(e.to_string()))?;
        Ok(Self { raw })
    }

    /// Wrap an already-parsed value.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// The payload as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consume the input, returning the payload.
    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Set a top-level field, e.g. a `logged_at` stamp before logging.
    ///
    /// Non-object payloads are left untouched.
    pub fn insert(&mut self, key: &str, value: Value) {
        if let Value::Object(map) = &mut self.raw {
            map.insert(key.to_string(), value);
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    pub fn session_id(&self) -> &str {
        self.str_field("session_id").unwrap_or(UNKNOWN_ID)
    }

    pub fn agent_id(&self) -> &str {
        self.str_field("agent_id").unwrap_or(UNKNOWN_ID)
    }

    pub fn agent_type(&self) -> &str {
        self.str_field("agent_type").unwrap_or(UNKNOWN_ID)
    }

    /// Event name as reported by the runtime, e.g. `PermissionRequest`.
    pub fn hook_event_name(&self) -> &str {
        self.str_field("hook_event_name").unwrap_or_default()
    }

    /// Compaction trigger: `manual` or `auto`.
    pub fn trigger(&self) -> &str {
        self.str_field("trigger").unwrap_or(UNKNOWN_ID)
    }

    pub fn custom_instructions(&self) -> &str {
        self.str_field("custom_instructions").unwrap_or_default()
    }

    /// A top-level field of any type, or `default` when absent or null.
    pub fn field_or(&self, key: &str, default: Value) -> Value {
        match self.raw.get(key) {
            Some(Value::Null) | None => default,
            Some(value) => value.clone(),
        }
    }

    /// Session start source: `startup`, `resume`, `clear`, or `compact`.
    pub fn source(&self) -> &str {
        self.str_field("source").unwrap_or(UNKNOWN_ID)
    }

    pub fn prompt(&self) -> &str {
        self.str_field("prompt").unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.str_field("message")
    }

    pub fn transcript_path(&self) -> Option<&str> {
        self.str_field("transcript_path").filter(|p| !p.is_empty())
    }

    pub fn tool_name(&self) -> &str {
        self.str_field("tool_name").unwrap_or_default()
    }

    /// Tool arguments; an empty map when absent or not an object.
    pub fn tool_input(&self) -> Map<String, Value> {
        self.raw
            .get("tool_input")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}
