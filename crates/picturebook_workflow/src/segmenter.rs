//! Splitting final story text into pages.

use crate::extraction::strip_code_fences;
use crate::prompts::{EDITOR_INSTRUCTIONS, editor_prompt};
use crate::request::{ask, text_request};
use crate::WorkflowConfig;
use picturebook_core::{Page, illustration_prompt_from_text};
use picturebook_error::{BackendError, PicturebookResult, StoryError, StoryErrorKind};
use picturebook_interface::TextDriver;
use serde::Deserialize;
use std::sync::Arc;

/// Which path produced a segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SegmentationSource {
    /// Pages came from the editor's JSON
    Structured,
    /// Pages came from blank-line splitting
    Fallback,
}

/// Ordered pages plus where they came from.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct Segmentation {
    pages: Vec<Page>,
    source: SegmentationSource,
}

impl Segmentation {
    /// Take the pages.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

#[derive(Debug, Deserialize)]
struct PagesPayload {
    pages: Vec<PagePayload>,
}

#[derive(Debug, Deserialize)]
struct PagePayload {
    page_number: u32,
    text: String,
    #[serde(default)]
    illustration_prompt: Option<String>,
}

fn malformed(reason: impl Into<String>) -> StoryError {
    StoryError::new(StoryErrorKind::MalformedPages(reason.into()))
}

/// Strictly parse an editor reply into pages.
///
/// The reply may be wrapped in a code fence. The JSON object must hold a
/// non-empty `pages` array whose entries carry an integer `page_number`
/// (exactly `1..=N` in order) and non-blank `text`. A blank
/// `illustration_prompt` counts as absent.
///
/// ```
/// use picturebook_workflow::parse_pages;
///
/// let reply = r#"```json
/// {"pages": [
///   {"page_number": 1, "text": "Tess was shy.", "illustration_prompt": "A shy turtle"},
///   {"page_number": 2, "text": "Then she was brave."}
/// ]}
/// ```"#;
/// let pages = parse_pages(reply).unwrap();
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[1].illustration_prompt(), &None);
/// ```
pub fn parse_pages(reply: &str) -> PicturebookResult<Vec<Page>> {
    let payload: PagesPayload = serde_json::from_str(strip_code_fences(reply))
        .map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

    if payload.pages.is_empty() {
        return Err(malformed("no pages").into());
    }

    payload
        .pages
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> PicturebookResult<Page> {
            let expected = index as u32 + 1;
            if entry.page_number != expected {
                return Err(malformed(format!(
                    "expected page {} but found page {}",
                    expected, entry.page_number
                ))
                .into());
            }
            let text = entry.text.trim();
            if text.is_empty() {
                return Err(malformed(format!("page {} has no text", expected)).into());
            }
            let prompt = entry
                .illustration_prompt
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty());
            Ok(Page::new(expected, text, prompt))
        })
        .collect()
}

/// Split text on blank lines, one page per non-empty paragraph.
///
/// Illustration prompts are derived from the first 200 characters of each
/// paragraph. Text without blank lines becomes a single page.
///
/// ```
/// use picturebook_workflow::fallback_segments;
///
/// let pages = fallback_segments("Once upon a time.\n\n  \nThe end.").unwrap();
/// assert_eq!(pages.len(), 2);
/// assert_eq!(*pages[1].page_number(), 2);
/// assert_eq!(pages[1].text(), "The end.");
/// ```
pub fn fallback_segments(text: &str) -> PicturebookResult<Vec<Page>> {
    let blank_line = regex::Regex::new(r"\n\s*\n")
        .map_err(|e| BackendError::new(format!("Invalid paragraph regex: {}", e)))?;

    Ok(blank_line
        .split(text)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .enumerate()
        .map(|(index, paragraph)| {
            Page::new(
                index as u32 + 1,
                paragraph,
                Some(illustration_prompt_from_text(paragraph)),
            )
        })
        .collect())
}

/// Asks the editor oracle for structured pages, falling back to
/// [`fallback_segments`].
///
/// The fallback runs when the editor call fails, returns nothing, returns
/// something [`parse_pages`] rejects, or returns zero pages.
pub struct PageSegmenter {
    editor: Arc<dyn TextDriver>,
    config: WorkflowConfig,
}

impl PageSegmenter {
    /// Segmenter backed by `editor`.
    pub fn new(editor: Arc<dyn TextDriver>, config: WorkflowConfig) -> Self {
        Self { editor, config }
    }

    /// Split `text` into pages for a reader of `age`.
    ///
    /// # Errors
    ///
    /// Fails with `NoPages` when the text is blank.
    #[tracing::instrument(skip(self, text), fields(text_length = text.len()))]
    pub async fn segment(&self, text: &str, age: f64) -> PicturebookResult<Segmentation> {
        if text.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::NoPages).into());
        }

        match self.structured(text, age).await {
            Some(pages) => {
                tracing::info!(pages = pages.len(), "Editor structured the story");
                Ok(Segmentation {
                    pages,
                    source: SegmentationSource::Structured,
                })
            }
            None => {
                let pages = fallback_segments(text)?;
                if pages.is_empty() {
                    return Err(StoryError::new(StoryErrorKind::NoPages).into());
                }
                tracing::info!(pages = pages.len(), "Split story on paragraph breaks");
                Ok(Segmentation {
                    pages,
                    source: SegmentationSource::Fallback,
                })
            }
        }
    }

    async fn structured(&self, text: &str, age: f64) -> Option<Vec<Page>> {
        let request = match text_request(EDITOR_INSTRUCTIONS, editor_prompt(text, age), &self.config) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Could not build editor request, using fallback split");
                return None;
            }
        };

        let reply = match ask(self.editor.as_ref(), &request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Editor call failed, using fallback split");
                return None;
            }
        };

        if reply.is_empty() {
            tracing::warn!("Editor returned nothing, using fallback split");
            return None;
        }

        match parse_pages(&reply) {
            Ok(pages) => Some(pages),
            Err(e) => {
                tracing::warn!(error = %e, reply_length = reply.len(), "Editor reply rejected, using fallback split");
                None
            }
        }
    }
}
