//! Core data types for Picturebook.
//!
//! The [`Story`] aggregate owns its ordered [`Page`]s, each of which may carry
//! an image and an audio [`AssetReference`]. Text oracles are addressed with
//! [`GenerateRequest`] / [`GenerateResponse`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod message;
mod output;
mod page;
mod request;
mod role;
mod status;
mod story;

pub use asset::{AssetKind, AssetReference, GeneratedMedia};
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use page::{
    ILLUSTRATION_PROMPT_CHARS, ILLUSTRATION_PROMPT_PREFIX, Page, illustration_prompt_from_text,
};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use status::StoryStatus;
pub use story::{Story, story_id_for};
