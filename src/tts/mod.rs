//! Spoken announcements.
//!
//! Speech goes through external programs: ElevenLabs synthesis via `curl`
//! played back with `afplay`, falling back to macOS `say`. Every failure is
//! silent to the caller; a speaker only reports whether it spoke.

mod elevenlabs;
mod say;

pub use elevenlabs::ElevenLabs;
pub use say::MacSay;

use crate::config::{Config, HookEnv};
use tracing::debug;

/// Something that can say a line of text out loud.
pub trait Speaker {
    /// Speak `text`, blocking until playback ends. Returns whether anything
    /// was spoken.
    fn speak(&self, text: &str) -> bool;
}

impl<S: Speaker + ?Sized> Speaker for &S {
    fn speak(&self, text: &str) -> bool {
        (**self).speak(text)
    }
}

impl<S: Speaker + ?Sized> Speaker for Box<S> {
    fn speak(&self, text: &str) -> bool {
        (**self).speak(text)
    }
}

/// Ordered fallback list of speakers.
#[derive(Default)]
pub struct SpeechChain {
    speakers: Vec<Box<dyn Speaker>>,
}

impl SpeechChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fallback.
    pub fn push<S: Speaker + 'static>(mut self, speaker: S) -> Self {
        self.speakers.push(Box::new(speaker));
        self
    }

    /// ElevenLabs when an API key is present, then `say`.
    pub fn from_config(config: &Config, hook_env: &HookEnv) -> Self {
        let mut chain = Self::new();
        if let Some(api_key) = &hook_env.elevenlabs_api_key {
            chain = chain.push(ElevenLabs::from_config(api_key.clone(), config));
        }
        chain.push(MacSay::from_config(config))
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}

impl Speaker for SpeechChain {
    fn speak(&self, text: &str) -> bool {
        for (index, speaker) in self.speakers.iter().enumerate() {
            if speaker.speak(text) {
                return true;
            }
            debug!(speaker = index, "speaker failed, trying next");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Scripted {
        succeeds: bool,
        calls: Rc<RefCell<Vec<String>>>,
        label: &'static str,
    }

    impl Speaker for Scripted {
        fn speak(&self, text: &str) -> bool {
            self.calls
                .borrow_mut()
                .push(format!("{}:{}", self.label, text));
            self.succeeds
        }
    }

    fn scripted(label: &'static str, succeeds: bool, calls: &Rc<RefCell<Vec<String>>>) -> Scripted {
        Scripted {
            succeeds,
            calls: Rc::clone(calls),
            label,
        }
    }

    #[test]
    fn test_chain_stops_at_first_success() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let chain = SpeechChain::new()
            .push(scripted("a", false, &calls))
            .push(scripted("b", true, &calls))
            .push(scripted("c", true, &calls));

        assert!(chain.speak("hi"));
        assert_eq!(*calls.borrow(), vec!["a:hi", "b:hi"]);
    }

    #[test]
    fn test_chain_reports_total_failure() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let chain = SpeechChain::new()
            .push(scripted("a", false, &calls))
            .push(scripted("b", false, &calls));

        assert!(!chain.speak("hi"));
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_empty_chain_speaks_nothing() {
        let chain = SpeechChain::new();
        assert!(chain.is_empty());
        assert!(!chain.speak("hi"));
    }

    #[test]
    fn test_from_config_without_api_key_uses_say_only() {
        let chain = SpeechChain::from_config(&Config::default(), &HookEnv::default());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_from_config_with_api_key_prefers_elevenlabs() {
        let hook_env = HookEnv {
            elevenlabs_api_key: Some("key".to_string()),
            ..HookEnv::default()
        };
        let chain = SpeechChain::from_config(&Config::default(), &hook_env);
        assert_eq!(chain.len(), 2);
    }
}
