//! Minimal `generateContent` REST transport for media modalities.

use super::{DEFAULT_API_BASE_URL, GeminiResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use picturebook_core::Output;
use picturebook_error::{GeminiError, GeminiErrorKind, HttpError, PicturebookResult};
use serde::Deserialize;

/// Shared HTTP plumbing for the image and speech clients.
#[derive(Clone)]
pub(crate) struct GeminiRest {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiRest {
    pub(crate) fn new(api_key: String) -> GeminiResult<Self> {
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        })
    }

    pub(crate) fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
    }

    /// POST a request body to `models/{model}:generateContent` and return the
    /// parts of the first candidate.
    pub(crate) async fn generate_content(
        &self,
        model: &str,
        body: &serde_json::Value,
    ) -> PicturebookResult<Vec<Output>> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("POST {}: {}", url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("reading response from {}: {}", url, e)))?;

        if !status.is_success() {
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: text,
            })
            .into());
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| GeminiError::new(GeminiErrorKind::UnexpectedResponse(e.to_string())))?;
        Ok(parsed.into_outputs()?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateContentResponse {
    /// Decode the first candidate's parts.
    ///
    /// A response without candidates yields no outputs rather than an error.
    pub(crate) fn into_outputs(self) -> GeminiResult<Vec<Output>> {
        let Some(content) = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
        else {
            return Ok(Vec::new());
        };

        let mut outputs = Vec::new();
        for part in content.parts {
            if let Some(inline) = part.inline_data {
                let data = BASE64_STANDARD
                    .decode(inline.data.as_bytes())
                    .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
                let mime = inline.mime_type;
                if mime.starts_with("audio/") {
                    outputs.push(Output::Audio { mime, data });
                } else {
                    outputs.push(Output::Image { mime, data });
                }
            } else if let Some(text) = part.text {
                outputs.push(Output::Text(text));
            }
        }
        Ok(outputs)
    }
}
