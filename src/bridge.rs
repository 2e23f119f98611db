// Conversation bridge
//
// Maps caller history onto model turns, prepends the two priming turns, and
// classifies model failures for the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::config::constants::SAFETY_MARKER;
use crate::errors::ChatError;
use crate::providers::{ChatModel, ConversationTurn, Role};

/// One history entry as the frontend sends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub text: String,
}

/// The synthetic opening exchange: our context, then the model's acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Priming {
    pub context: String,
    pub acknowledgement: String,
}

impl Priming {
    pub fn new(context: impl Into<String>, acknowledgement: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            acknowledgement: acknowledgement.into(),
        }
    }

    fn turns(&self) -> [ConversationTurn; 2] {
        [
            ConversationTurn::user(self.context.clone()),
            ConversationTurn::model(self.acknowledgement.clone()),
        ]
    }
}

/// Anything the frontend did not tag as "user" came from the model.
fn map_entry(entry: &HistoryEntry) -> ConversationTurn {
    let role = if entry.sender == "user" {
        Role::User
    } else {
        Role::Model
    };
    ConversationTurn {
        role,
        text: entry.text.clone(),
    }
}

/// Prior turns for submission: priming first, then caller history.
///
/// A trailing user turn is dropped; the frontend echoes the pending message
/// into history, and it is sent separately as the live turn.
pub fn build_turns(priming: &Priming, history: &[HistoryEntry]) -> Vec<ConversationTurn> {
    let mut mapped: Vec<ConversationTurn> = history.iter().map(map_entry).collect();
    if mapped.last().map(|turn| turn.role) == Some(Role::User) {
        mapped.pop();
    }

    let mut turns = Vec::with_capacity(mapped.len() + 2);
    turns.extend(priming.turns());
    turns.extend(mapped);
    turns
}

/// Submit `turns` as history and `message` as the live turn.
pub async fn send_message(
    model: &dyn ChatModel,
    turns: &[ConversationTurn],
    message: &str,
) -> Result<String, ChatError> {
    model
        .generate(turns, message)
        .await
        .map_err(classify_model_error)
}

/// Safety blocks are user-facing; everything else is internal.
pub fn classify_model_error(err: anyhow::Error) -> ChatError {
    if format!("{:#}", err).contains(SAFETY_MARKER) {
        ChatError::ContentBlocked
    } else {
        ChatError::Internal(err)
    }
}
