//! Trait definitions for the generation oracles.

use async_trait::async_trait;
use picturebook_core::{GenerateRequest, GenerateResponse, GeneratedMedia};
use picturebook_error::PicturebookResult;

/// A text generation backend (writer, critic, refiner, and editor calls).
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> PicturebookResult<GenerateResponse>;

    /// Provider name (e.g. "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model used when the request does not name one.
    fn model_name(&self) -> &str;
}

/// Turns an illustration prompt into image bytes.
///
/// `Ok(None)` means the oracle answered without an image (a refusal or a
/// text-only reply). `Err` is reserved for transport or unexpected failures.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one illustration.
    async fn generate_image(&self, prompt: &str) -> PicturebookResult<Option<GeneratedMedia>>;
}

/// Turns page text into narration audio.
///
/// Successful media is raw 16-bit little-endian mono PCM at 24 kHz. `Ok(None)`
/// means the oracle returned no audio candidates.
#[async_trait]
pub trait SpeechGenerator: Send + Sync {
    /// Generate narration for `text`.
    async fn generate_speech(&self, text: &str) -> PicturebookResult<Option<GeneratedMedia>>;
}

#[async_trait]
impl<T: TextDriver + ?Sized> TextDriver for std::sync::Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> PicturebookResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
