//! Page illustrations.

use super::DEFAULT_IMAGE_MODEL;
use super::rest::GeminiRest;
use async_trait::async_trait;
use picturebook_core::{GeneratedMedia, Output};
use picturebook_error::PicturebookResult;
use picturebook_interface::ImageGenerator;
use serde_json::json;

/// Image generation through `generateContent` with the `IMAGE` modality.
#[derive(Clone)]
pub struct GeminiImageClient {
    rest: GeminiRest,
    model: String,
}

impl GeminiImageClient {
    /// Create an image client.
    ///
    /// # Errors
    ///
    /// Fails when the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, model: &str) -> PicturebookResult<Self> {
        let model = if model.is_empty() {
            DEFAULT_IMAGE_MODEL
        } else {
            model
        };
        Ok(Self {
            rest: GeminiRest::new(api_key.into())?,
            model: model.to_string(),
        })
    }

    /// Point at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.rest.set_base_url(base_url);
        self
    }

    /// Model used for illustrations.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate_image(&self, prompt: &str) -> PicturebookResult<Option<GeneratedMedia>> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE"]
            }
        });

        let outputs = self.rest.generate_content(&self.model, &body).await?;

        let mut refusal = Vec::new();
        for output in outputs {
            match output {
                Output::Image { mime, data } if !data.is_empty() => {
                    tracing::debug!(mime = %mime, bytes = data.len(), "Received illustration");
                    return Ok(Some(GeneratedMedia::new(mime, data)));
                }
                Output::Text(text) => refusal.push(text),
                _ => {}
            }
        }

        tracing::warn!(reply = %refusal.join(" "), "Image model returned no image");
        Ok(None)
    }
}
