//! Instructions sent to the text oracles.
//!
//! Each stage has a fixed system instruction plus a user message built from
//! the current story state.

/// Writer: produce the first draft.
pub const WRITER_INSTRUCTIONS: &str = "You are a children's story writer. Based on the user's prompt, \
write the first draft of a short story of around 100 to 150 words. \
Output only the story text, with no introduction or explanation.";

/// Critic: approve or suggest changes.
pub const CRITIC_INSTRUCTIONS: &str = "You are a constructive story critic. Review the story you are given \
and evaluate its plot, characters and pacing. \
If the story is well-written and complete, respond with the exact phrase: APPROVED \
Otherwise, provide 2-3 specific, actionable suggestions for improvement.";

/// Refiner: rewrite the draft against a critique.
pub const REFINER_INSTRUCTIONS: &str = "You are a story refiner. You receive a story draft and a critique of it. \
Rewrite the draft so that it fully incorporates the feedback. \
Output only the revised story text, with no introduction or explanation.";

/// Editor: split the final text into illustrated pages.
pub const EDITOR_INSTRUCTIONS: &str = r#"You are a children's book editor. Structure the story you are given into pages.

Split the story into 4-8 pages depending on its length and the reader's age. Each page should:
- be 2-4 sentences long (younger readers get shorter pages)
- show one clear scene or moment that can be illustrated
- keep the story flowing and end on a natural pause

For each page give the page text (taken from the story, lightly edited at most) and a vivid,
child-friendly, colorful illustration prompt describing the scene.

Output Format: return ONLY valid JSON with this structure:
{
  "pages": [
    {
      "page_number": 1,
      "text": "Page text here...",
      "illustration_prompt": "A detailed description for the illustrator..."
    }
  ]
}

CRITICAL: Output ONLY valid JSON, no other text or explanation."#;

/// User prompt that starts a story.
///
/// ```
/// use picturebook_workflow::prompts::draft_prompt;
///
/// assert_eq!(
///     draft_prompt("a brave turtle", 5.0),
///     "Write a short story for a 5 year old child about a brave turtle."
/// );
/// ```
pub fn draft_prompt(topic: &str, age: f64) -> String {
    format!("Write a short story for a {} year old child about {}.", age, topic)
}

/// User message for the critic.
pub fn critique_prompt(draft: &str) -> String {
    format!("Story:\n{}", draft)
}

/// User message for the refiner.
pub fn refine_prompt(draft: &str, critique: &str) -> String {
    format!("Story Draft:\n{}\n\nCritique:\n{}", draft, critique)
}

/// User message for the editor.
pub fn editor_prompt(story_text: &str, age: f64) -> String {
    format!(
        "Please structure this story into 4-8 pages for a {} year old child.\n\nStory:\n{}",
        age, story_text
    )
}
