//! macOS `say` fallback.

use super::Speaker;
use crate::config::Config;
use crate::process::run_command;
use tracing::debug;

/// Speaks through the system `say` command at a fixed rate and volume.
#[derive(Debug, Clone)]
pub struct MacSay {
    rate: u32,
    volume: f64,
}

impl MacSay {
    pub fn new(rate: u32, volume: f64) -> Self {
        Self { rate, volume }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.say_rate, config.say_volume)
    }

    /// Text with the inline volume command `say` understands.
    fn utterance(&self, text: &str) -> String {
        format!("[[volm {}]]{}", self.volume, text)
    }
}

impl Speaker for MacSay {
    fn speak(&self, text: &str) -> bool {
        let rate = self.rate.to_string();
        let utterance = self.utterance(text);

        match run_command("say", &["-r", &rate, &utterance], None) {
            Ok(_) => true,
            Err(e) => {
                debug!("say failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utterance_prefixes_volume() {
        let say = MacSay::from_config(&Config::default());
        assert_eq!(say.utterance("All done!"), "[[volm 0.25]]All done!");
    }

    #[test]
    fn test_custom_volume() {
        assert_eq!(MacSay::new(200, 1.0).utterance("x"), "[[volm 1]]x");
    }
}
