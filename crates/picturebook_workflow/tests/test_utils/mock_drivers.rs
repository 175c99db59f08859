//! Scripted oracles.

use async_trait::async_trait;
use picturebook_core::{GenerateRequest, GenerateResponse, GeneratedMedia};
use picturebook_error::{BackendError, PicturebookResult};
use picturebook_interface::{ImageGenerator, SpeechGenerator, TextDriver};
use picturebook_workflow::prompts::{
    CRITIC_INSTRUCTIONS, EDITOR_INSTRUCTIONS, REFINER_INSTRUCTIONS, WRITER_INSTRUCTIONS,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;

/// Which workflow stage sent a request, read from its system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Writer,
    Critic,
    Refiner,
    Editor,
}

impl Stage {
    fn of(request: &GenerateRequest) -> Stage {
        match request.system_prompt() {
            Some(CRITIC_INSTRUCTIONS) => Stage::Critic,
            Some(REFINER_INSTRUCTIONS) => Stage::Refiner,
            Some(EDITOR_INSTRUCTIONS) => Stage::Editor,
            Some(WRITER_INSTRUCTIONS) => Stage::Writer,
            other => panic!("unexpected system prompt: {other:?}"),
        }
    }
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        MockReply::Error(message.into())
    }
}

pub const TURTLE_DRAFT: &str = "Tess the turtle was shy.\n\nOne day she swam past the reef.\n\nShe found her courage and made a friend.";

pub const TURTLE_PAGES: &str = r#"```json
{
  "pages": [
    {"page_number": 1, "text": "Tess the turtle was shy.", "illustration_prompt": "A shy green turtle hiding in a shell"},
    {"page_number": 2, "text": "One day she swam past the reef.", "illustration_prompt": "A turtle swimming past a bright coral reef"},
    {"page_number": 3, "text": "She found her courage and made a friend."}
  ]
}
```"#;

/// Text oracle with a reply queue per stage.
///
/// When a stage's queue is empty its default reply is used. Defaults: the
/// writer returns a three-paragraph turtle story, the critic approves, the
/// refiner returns a rewrite, the editor returns three JSON pages.
pub struct MockTextDriver {
    scripts: Mutex<HashMap<Stage, VecDeque<MockReply>>>,
    defaults: Mutex<HashMap<Stage, MockReply>>,
    requests: Mutex<Vec<(Stage, GenerateRequest)>>,
}

impl MockTextDriver {
    pub fn new() -> Self {
        let defaults = HashMap::from([
            (Stage::Writer, MockReply::text(TURTLE_DRAFT)),
            (Stage::Critic, MockReply::text("APPROVED")),
            (Stage::Refiner, MockReply::text(TURTLE_DRAFT)),
            (Stage::Editor, MockReply::text(TURTLE_PAGES)),
        ]);
        Self {
            scripts: Mutex::new(HashMap::new()),
            defaults: Mutex::new(defaults),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue replies for a stage.
    pub fn script(self, stage: Stage, replies: Vec<MockReply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(stage)
            .or_default()
            .extend(replies);
        self
    }

    /// Reply used once a stage's queue is empty.
    pub fn default_reply(self, stage: Stage, reply: MockReply) -> Self {
        self.defaults.lock().unwrap().insert(stage, reply);
        self
    }

    pub fn calls(&self, stage: Stage) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == stage)
            .count()
    }

    /// Draft-producing calls: the first draft plus rewrites.
    pub fn draft_generations(&self) -> usize {
        self.calls(Stage::Writer) + self.calls(Stage::Refiner)
    }

    pub fn requests(&self, stage: Stage) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == stage)
            .map(|(_, request)| request.clone())
            .collect()
    }

    fn next_reply(&self, stage: Stage) -> MockReply {
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&stage)
            .and_then(VecDeque::pop_front);
        scripted.unwrap_or_else(|| self.defaults.lock().unwrap()[&stage].clone())
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    async fn generate(&self, req: &GenerateRequest) -> PicturebookResult<GenerateResponse> {
        let stage = Stage::of(req);
        self.requests.lock().unwrap().push((stage, req.clone()));
        match self.next_reply(stage) {
            MockReply::Text(text) => Ok(GenerateResponse::text(text)),
            MockReply::Error(message) => Err(BackendError::new(message).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// How a media oracle responds.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return these bytes
    Media(GeneratedMedia),
    /// Return no media (refusal or empty candidates)
    Nothing,
    /// Fail the call
    Error(String),
}

impl MockBehavior {
    fn respond(&self) -> PicturebookResult<Option<GeneratedMedia>> {
        match self {
            MockBehavior::Media(media) => Ok(Some(media.clone())),
            MockBehavior::Nothing => Ok(None),
            MockBehavior::Error(message) => Err(BackendError::new(message.clone()).into()),
        }
    }
}

/// Scripted image oracle recording the prompts it saw.
pub struct MockImageGenerator {
    behavior: MockBehavior,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockImageGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn png() -> Self {
        Self::new(MockBehavior::Media(GeneratedMedia::new(
            "image/png",
            b"\x89PNG\r\n\x1a\nfake".to_vec(),
        )))
    }

    pub fn refusing() -> Self {
        Self::new(MockBehavior::Nothing)
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockBehavior::Error(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, prompt: &str) -> PicturebookResult<Option<GeneratedMedia>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.behavior.respond()
    }
}

/// Bytes of PCM returned by [`MockSpeechGenerator::pcm`].
pub const MOCK_PCM_LEN: usize = 480;

/// Scripted speech oracle.
pub struct MockSpeechGenerator {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockSpeechGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// 10 ms of silent 24 kHz mono 16-bit PCM.
    pub fn pcm() -> Self {
        Self::new(MockBehavior::Media(GeneratedMedia::new(
            "audio/L16;codec=pcm;rate=24000",
            vec![0u8; MOCK_PCM_LEN],
        )))
    }

    pub fn silent() -> Self {
        Self::new(MockBehavior::Nothing)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechGenerator for MockSpeechGenerator {
    async fn generate_speech(&self, _text: &str) -> PicturebookResult<Option<GeneratedMedia>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.behavior.respond()
    }
}

/// Media oracle that only answers once both the image and the speech call are
/// in flight. A caller that awaits one before starting the other never returns.
pub struct RendezvousGenerator {
    barrier: Arc<Barrier>,
    image: MockImageGenerator,
    speech: MockSpeechGenerator,
}

impl RendezvousGenerator {
    pub fn new() -> Self {
        Self {
            barrier: Arc::new(Barrier::new(2)),
            image: MockImageGenerator::png(),
            speech: MockSpeechGenerator::pcm(),
        }
    }
}

#[async_trait]
impl ImageGenerator for RendezvousGenerator {
    async fn generate_image(&self, prompt: &str) -> PicturebookResult<Option<GeneratedMedia>> {
        self.barrier.wait().await;
        self.image.generate_image(prompt).await
    }
}

#[async_trait]
impl SpeechGenerator for RendezvousGenerator {
    async fn generate_speech(&self, text: &str) -> PicturebookResult<Option<GeneratedMedia>> {
        self.barrier.wait().await;
        self.speech.generate_speech(text).await
    }
}
