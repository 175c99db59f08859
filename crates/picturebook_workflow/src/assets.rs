//! Per-page image and narration generation.

use picturebook_core::{AssetReference, GeneratedMedia, Page};
use picturebook_error::PicturebookResult;
use picturebook_interface::{ImageGenerator, SpeechGenerator};
use picturebook_storage::{MediaMetadata, MediaStorage, PcmFormat, encode_wav};
use std::sync::Arc;

/// Read the sample rate out of a MIME type such as
/// `audio/L16;codec=pcm;rate=24000`, keeping the narration defaults otherwise.
fn pcm_format_for(mime: &str) -> PcmFormat {
    let rate = mime
        .split(';')
        .filter_map(|param| param.trim().strip_prefix("rate="))
        .find_map(|value| value.trim().parse::<u32>().ok());
    match rate {
        Some(sample_rate) if sample_rate > 0 => PcmFormat {
            sample_rate,
            ..PcmFormat::NARRATION
        },
        _ => PcmFormat::NARRATION,
    }
}

fn is_wav(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    matches!(essence, "audio/wav" | "audio/x-wav" | "audio/wave")
}

/// Runs the illustrator and narrator for one page at the same time.
///
/// A generator that produces no media, or a write that fails, leaves that
/// reference unset and the page is kept. A generator error fails the page.
pub struct PageAssetPipeline {
    illustrator: Arc<dyn ImageGenerator>,
    narrator: Arc<dyn SpeechGenerator>,
    storage: Arc<dyn MediaStorage>,
}

impl PageAssetPipeline {
    /// Pipeline writing through `storage`.
    pub fn new(
        illustrator: Arc<dyn ImageGenerator>,
        narrator: Arc<dyn SpeechGenerator>,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            illustrator,
            narrator,
            storage,
        }
    }

    /// Generate and store the image and narration for `page`.
    ///
    /// # Errors
    ///
    /// Propagates generator errors. Both generators always run to completion
    /// first.
    #[tracing::instrument(skip(self, page), fields(page_number = *page.page_number()))]
    pub async fn process(&self, story_id: &str, page: Page) -> PicturebookResult<Page> {
        let page_number = *page.page_number();
        let prompt = page.effective_illustration_prompt();

        let (image, audio) = tokio::join!(
            self.illustrate(story_id, page_number, &prompt),
            self.narrate(story_id, page_number, page.text()),
        );
        let image = image?;
        let audio = audio?;

        tracing::info!(
            has_image = image.is_some(),
            has_audio = audio.is_some(),
            "Page assets ready"
        );
        Ok(page.with_image(image).with_audio(audio))
    }

    async fn illustrate(
        &self,
        story_id: &str,
        page_number: u32,
        prompt: &str,
    ) -> PicturebookResult<Option<AssetReference>> {
        let Some(GeneratedMedia { mime, data }) = self.illustrator.generate_image(prompt).await?
        else {
            tracing::warn!(page_number, "No image generated for page");
            return Ok(None);
        };

        let metadata = MediaMetadata::page_image(story_id, page_number, mime);
        Ok(self.store(&data, &metadata).await)
    }

    async fn narrate(
        &self,
        story_id: &str,
        page_number: u32,
        text: &str,
    ) -> PicturebookResult<Option<AssetReference>> {
        let Some(GeneratedMedia { mime, data }) = self.narrator.generate_speech(text).await? else {
            tracing::warn!(page_number, "No audio generated for page");
            return Ok(None);
        };

        let wav = if is_wav(&mime) {
            data
        } else {
            match encode_wav(&data, pcm_format_for(&mime)) {
                Ok(wav) => wav,
                Err(e) => {
                    tracing::error!(page_number, error = %e, "Could not encode narration");
                    return Ok(None);
                }
            }
        };

        let metadata = MediaMetadata::page_audio(story_id, page_number);
        Ok(self.store(&wav, &metadata).await)
    }

    async fn store(&self, data: &[u8], metadata: &MediaMetadata) -> Option<AssetReference> {
        match self.storage.store(data, metadata).await {
            Ok(reference) => Some(reference),
            Err(e) => {
                tracing::error!(
                    file = %metadata.file_name(),
                    error = %e,
                    "Failed to write asset"
                );
                None
            }
        }
    }
}
