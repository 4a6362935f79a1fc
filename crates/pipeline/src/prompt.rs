//! Prompt composition for the completion request.
//!
//! The system message is the operator's instructions plus a fixed
//! grounding directive; the user message is the query followed by the
//! assembled context block. Instructions text is used verbatim, never
//! parsed or validated, and may be empty.

use groundwork_core::prompt::PromptPayload;

/// Appended to the instructions in every system message.
pub const GROUNDING_DIRECTIVE: &str =
    "RULE: If context is insufficient, ask a clarifying question.";

/// Compose the system and user messages for one query.
pub fn build(instructions: &str, context: &str, query: &str) -> PromptPayload {
    PromptPayload::new(
        format!("{instructions}\n\n{GROUNDING_DIRECTIVE}"),
        format!("{query}\n\nContext:\n{context}"),
    )
}
