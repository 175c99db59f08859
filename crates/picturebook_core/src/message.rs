//! Messages sent to text oracles.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One turn of a text generation request.
///
/// ```
/// use picturebook_core::{Message, Role};
///
/// let message = Message::user("Write a story about a kite.");
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// Message text
    #[builder(setter(into))]
    pub content: String,
}

impl Message {
    /// System instruction turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
