//! The final prompt artifact handed to the completion collaborator.

use crate::provider::ChatMessage;
use serde::{Deserialize, Serialize};

/// A fully composed prompt: system instructions plus the grounded user query.
///
/// Built once per request by the prompt builder and consumed immediately;
/// nothing in it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub system: String,
    pub user: String,
}

impl PromptPayload {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Render as the two chat messages a completion request carries.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(&self.system),
            ChatMessage::user(&self.user),
        ]
    }
}
