use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Renders `text` to encoded audio with the given voice.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes>;
}
