#![cfg(feature = "gemini")]

//! Live Gemini calls. Run with `--features gemini,api` and GEMINI_API_KEY set.

use picturebook_core::{GenerateRequest, Message};
use picturebook_interface::{ImageGenerator, SpeechGenerator, TextDriver};
use picturebook_models::{
    DEFAULT_IMAGE_MODEL, DEFAULT_SPEECH_MODEL, DEFAULT_TEXT_MODEL, GeminiClient,
    GeminiImageClient, GeminiSpeechClient,
};

fn api_key() -> String {
    let _ = dotenvy::dotenv();
    std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set for api tests")
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_text_generation() -> anyhow::Result<()> {
    let client = GeminiClient::new(api_key(), DEFAULT_TEXT_MODEL)?;
    let request = GenerateRequest::builder()
        .messages(vec![
            Message::system("Answer with a single word."),
            Message::user("What colour is the sky on a clear day?"),
        ])
        .max_tokens(Some(10))
        .build()?;

    let response = client.generate(&request).await?;
    assert!(!response.joined_text().trim().is_empty());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_image_generation() -> anyhow::Result<()> {
    let client = GeminiImageClient::new(api_key(), DEFAULT_IMAGE_MODEL)?;
    let media = client
        .generate_image("Children's book illustration: a turtle wearing a red scarf")
        .await?;

    if let Some(media) = media {
        assert!(media.mime.starts_with("image/"));
        assert!(!media.data.is_empty());
    }
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_speech_generation() -> anyhow::Result<()> {
    let client = GeminiSpeechClient::new(api_key(), DEFAULT_SPEECH_MODEL)?;
    let media = client
        .generate_speech("Once upon a time, a brave turtle set off.")
        .await?;

    let media = media.expect("speech model returned no audio");
    assert_eq!(media.data.len() % 2, 0);
    Ok(())
}
