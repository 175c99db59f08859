//! Shared request plumbing for the text stages.

use crate::WorkflowConfig;
use picturebook_core::{GenerateRequest, Message};
use picturebook_error::{BackendError, PicturebookResult};
use picturebook_interface::TextDriver;

/// Build a system + user request carrying the configured sampling settings.
pub(crate) fn text_request(
    instructions: &str,
    user: String,
    config: &WorkflowConfig,
) -> PicturebookResult<GenerateRequest> {
    GenerateRequest::builder()
        .messages(vec![Message::system(instructions), Message::user(user)])
        .temperature(*config.temperature())
        .max_tokens(*config.max_tokens())
        .build()
        .map_err(|e| BackendError::new(format!("Failed to build request: {}", e)).into())
}

/// Send a request and return the trimmed text of the reply.
pub(crate) async fn ask(driver: &dyn TextDriver, request: &GenerateRequest) -> PicturebookResult<String> {
    let response = driver.generate(request).await?;
    let text = response.joined_text();
    tracing::debug!(
        provider = driver.provider_name(),
        model = driver.model_name(),
        response_length = text.len(),
        "Text oracle replied"
    );
    Ok(text.trim().to_string())
}
