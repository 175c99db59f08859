//! Text generation through the `gemini-rust` SDK.

use super::{DEFAULT_TEXT_MODEL, GeminiResult};
use async_trait::async_trait;
use gemini_rust::{Gemini, client::Model};
use picturebook_core::{GenerateRequest, GenerateResponse, Output, Role};
use picturebook_error::{GeminiError, GeminiErrorKind, PicturebookResult};
use picturebook_interface::TextDriver;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::instrument;

/// Gemini text client.
///
/// Keeps one SDK client per model so a request can override the default
/// model (writer and editor may differ) without reconnecting each call.
///
/// ```no_run
/// use picturebook_models::GeminiClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let api_key = std::env::var("GEMINI_API_KEY")?;
/// let client = GeminiClient::new(api_key, "gemini-2.5-flash-lite")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    api_key: String,
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client with an explicit API key and default model.
    ///
    /// # Errors
    ///
    /// Fails when the key is blank.
    #[instrument(name = "gemini_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>, model_name: &str) -> PicturebookResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }
        let model_name = if model_name.is_empty() {
            DEFAULT_TEXT_MODEL
        } else {
            model_name
        };
        Ok(Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key,
            model_name: model_name.to_string(),
        })
    }

    /// Map a model name onto the SDK's model enum.
    ///
    /// Unknown names become `Model::Custom` with the `models/` prefix the API
    /// expects.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    fn client_for(&self, model_name: &str) -> GeminiResult<Gemini> {
        let mut clients = self.clients.lock().map_err(|_| {
            GeminiError::new(GeminiErrorKind::ClientCreation(
                "client pool lock poisoned".to_string(),
            ))
        })?;

        if let Some(client) = clients.get(model_name) {
            return Ok(client.clone());
        }

        let client = Gemini::with_model(&self.api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        clients.insert(model_name.to_string(), client.clone());
        Ok(client)
    }

    #[instrument(skip(self, req), fields(model))]
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let model_name = req.model().as_deref().unwrap_or(&self.model_name);
        tracing::Span::current().record("model", model_name);

        let client = self.client_for(model_name)?;
        let mut builder = client.generate_content();

        for message in req.messages() {
            match message.role {
                Role::System => builder = builder.with_system_prompt(&message.content),
                Role::User => builder = builder.with_user_message(&message.content),
                Role::Assistant => builder = builder.with_model_message(&message.content),
            }
        }

        if let Some(temperature) = req.temperature() {
            builder = builder.with_temperature(*temperature);
        }

        if let Some(max_tokens) = req.max_tokens() {
            builder = builder.with_max_output_tokens(*max_tokens as i32);
        }

        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;
        let text = response.text();

        tracing::debug!(chars = text.len(), "Gemini text response");
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    /// Turn an SDK error into a structured error, keeping the HTTP status when
    /// the message carries one ("...; code 503; ...").
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let message = err.to_string();
        match Self::extract_status_code(&message) {
            Some(status_code) => GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message,
            }),
            None => GeminiError::new(GeminiErrorKind::ApiRequest(message)),
        }
    }

    fn extract_status_code(message: &str) -> Option<u16> {
        let start = message.find("code ")? + 5;
        let digits: String = message[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

#[async_trait]
impl TextDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> PicturebookResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
