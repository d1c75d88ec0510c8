//! ElevenLabs speech via `curl` and `afplay`.

use super::Speaker;
use crate::config::Config;
use crate::process::run_command;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const API_BASE: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Synthesizes speech with the ElevenLabs HTTP API and plays the mp3.
#[derive(Debug, Clone)]
pub struct ElevenLabs {
    api_key: String,
    voice_id: String,
    model_id: String,
    timeout_secs: u64,
}

impl ElevenLabs {
    pub fn from_config(api_key: String, config: &Config) -> Self {
        Self {
            api_key,
            voice_id: config.elevenlabs_voice_id.clone(),
            model_id: config.elevenlabs_model.clone(),
            timeout_secs: config.elevenlabs_timeout_secs,
        }
    }

    fn url(&self) -> String {
        format!("{}/{}", API_BASE, self.voice_id)
    }

    fn request_body(&self, text: &str) -> String {
        json!({
            "text": text,
            "model_id": self.model_id,
            "output_format": OUTPUT_FORMAT,
        })
        .to_string()
    }

    /// Arguments for the synthesis request writing audio to `output`.
    fn curl_args(&self, text: &str, output: &Path) -> Vec<String> {
        vec![
            "-s".to_string(),
            "--fail".to_string(),
            "--max-time".to_string(),
            self.timeout_secs.to_string(),
            "-X".to_string(),
            "POST".to_string(),
            self.url(),
            "-H".to_string(),
            format!("xi-api-key: {}", self.api_key),
            "-H".to_string(),
            "Content-Type: application/json".to_string(),
            "-d".to_string(),
            self.request_body(text),
            "-o".to_string(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

/// Temporary audio file, removed on drop whatever happened to it.
struct TempAudio(PathBuf);

impl TempAudio {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("chime-tts-{}.mp3", std::process::id())))
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

impl Speaker for ElevenLabs {
    fn speak(&self, text: &str) -> bool {
        let audio = TempAudio::new();
        let args = self.curl_args(text, &audio.0);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        if let Err(e) = run_command("curl", &args, None) {
            debug!("elevenlabs synthesis failed: {}", e);
            return false;
        }

        let path = audio.0.to_string_lossy();
        match run_command("afplay", &[path.as_ref()], None) {
            Ok(_) => true,
            Err(e) => {
                debug!("afplay failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn speaker() -> ElevenLabs {
        ElevenLabs::from_config("secret".to_string(), &Config::default())
    }

    #[test]
    fn test_url_uses_configured_voice() {
        assert_eq!(
            speaker().url(),
            "https://api.elevenlabs.io/v1/text-to-speech/WejK3H1m7MI9CHnIjW9K"
        );
    }

    #[test]
    fn test_request_body_fields() {
        let body: Value = serde_json::from_str(&speaker().request_body("Hi \"there\"")).unwrap();
        assert_eq!(body["text"], "Hi \"there\"");
        assert_eq!(body["model_id"], "eleven_turbo_v2_5");
        assert_eq!(body["output_format"], "mp3_44100_128");
    }

    #[test]
    fn test_curl_args_shape() {
        let args = speaker().curl_args("hello", Path::new("/tmp/out.mp3"));

        assert_eq!(&args[..4], &["-s", "--fail", "--max-time", "15"]);
        assert!(args.contains(&"xi-api-key: secret".to_string()));
        assert_eq!(&args[args.len() - 2..], &["-o", "/tmp/out.mp3"]);
    }

    #[test]
    fn test_temp_audio_removed_on_drop() {
        let audio = TempAudio::new();
        fs::write(&audio.0, b"mp3").unwrap();
        let path = audio.0.clone();

        drop(audio);
        assert!(!path.exists());
    }
}
