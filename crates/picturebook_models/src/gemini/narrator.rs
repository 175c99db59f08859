//! Page narration.

use super::{DEFAULT_SPEECH_MODEL, DEFAULT_VOICE};
use super::rest::GeminiRest;
use async_trait::async_trait;
use picturebook_core::{GeneratedMedia, Output};
use picturebook_error::PicturebookResult;
use picturebook_interface::SpeechGenerator;
use serde_json::json;

/// Text-to-speech through `generateContent` with the `AUDIO` modality.
///
/// The API answers with raw 24 kHz mono 16-bit PCM; wrapping it in a WAVE
/// container is left to storage.
#[derive(Clone)]
pub struct GeminiSpeechClient {
    rest: GeminiRest,
    model: String,
    voice: String,
}

impl GeminiSpeechClient {
    /// Create a speech client using the default voice.
    ///
    /// # Errors
    ///
    /// Fails when the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, model: &str) -> PicturebookResult<Self> {
        let model = if model.is_empty() {
            DEFAULT_SPEECH_MODEL
        } else {
            model
        };
        Ok(Self {
            rest: GeminiRest::new(api_key.into())?,
            model: model.to_string(),
            voice: DEFAULT_VOICE.to_string(),
        })
    }

    /// Use a different prebuilt voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Point at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.rest.set_base_url(base_url);
        self
    }

    /// Prebuilt voice name.
    pub fn voice(&self) -> &str {
        &self.voice
    }
}

#[async_trait]
impl SpeechGenerator for GeminiSpeechClient {
    #[tracing::instrument(skip(self, text), fields(model = %self.model, voice = %self.voice, chars = text.len()))]
    async fn generate_speech(&self, text: &str) -> PicturebookResult<Option<GeneratedMedia>> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": text }]
            }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": self.voice }
                    }
                }
            }
        });

        let outputs = self.rest.generate_content(&self.model, &body).await?;

        let audio = outputs.into_iter().find_map(|output| match output {
            Output::Audio { mime, data } if !data.is_empty() => Some(GeneratedMedia::new(mime, data)),
            _ => None,
        });

        if audio.is_none() {
            tracing::warn!("Speech model returned no audio candidates");
        }
        Ok(audio)
    }
}
