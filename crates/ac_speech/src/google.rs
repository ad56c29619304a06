use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use ac_core::{Error, Result, SpeechSynthesizer};

pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Voice names carry their own language prefix (e.g. en-US-Standard-B), but
/// the API still requires an explicit language code alongside.
const LANGUAGE_CODE: &str = "en-US";

/// Google Cloud Text-to-Speech client. Returns MP3 audio.
pub struct GoogleSynthesizer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for GoogleSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSynthesizer")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GoogleSynthesizer {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Synthesis(
                "Google TTS API key is required".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

#[async_trait]
impl SpeechSynthesizer for GoogleSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes> {
        if voice.is_empty() {
            return Err(Error::Synthesis("voice name must not be empty".to_string()));
        }

        let body = serde_json::json!({
            "input": { "text": text },
            "voice": { "languageCode": LANGUAGE_CODE, "name": voice },
            "audioConfig": { "audioEncoding": "MP3" },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("synthesis request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!(
                "synthesis returned {}: {}",
                status, detail
            )));
        }

        let payload: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| Error::Synthesis(format!("invalid synthesis response: {}", e)))?;

        let audio = general_purpose::STANDARD
            .decode(payload.audio_content)
            .map_err(|e| Error::Synthesis(format!("invalid audio payload: {}", e)))?;

        debug!("synthesized {} bytes with voice {}", audio.len(), voice);
        Ok(Bytes::from(audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesizer_requires_api_key() {
        let result = GoogleSynthesizer::new("");
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "synthesis error: Google TTS API key is required"
        );

        assert!(GoogleSynthesizer::new("test-key").is_ok());
    }

    #[tokio::test]
    async fn test_synthesize_rejects_empty_voice() {
        let synthesizer = GoogleSynthesizer::new("test-key").unwrap();
        let result = synthesizer.synthesize("Hello", "").await;
        assert!(matches!(result, Err(Error::Synthesis(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let synthesizer = GoogleSynthesizer::new("super-secret").unwrap();
        let debug = format!("{:?}", synthesizer);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
