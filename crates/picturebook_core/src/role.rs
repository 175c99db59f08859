//! Conversation roles.

use serde::{Deserialize, Serialize};

/// Who authored a message sent to a text oracle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// Standing instructions for the model
    System,
    /// The request itself
    User,
    /// Earlier model output replayed as context
    Assistant,
}
