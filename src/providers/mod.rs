// Generative model abstraction
//
// The relay treats the model as an opaque capability: prior turns plus one new
// user message in, reply text out. Gemini is the only backend.

use anyhow::Result;
use async_trait::async_trait;

pub mod gemini;
pub mod types;

pub use gemini::GeminiProvider;
pub use types::{
    default_safety_settings, ConversationTurn, GenerationConfig, HarmBlockThreshold, HarmCategory,
    Role, SafetySetting,
};

/// Trait for chat model backends
///
/// Errors caused by the backend's safety filter must mention `SAFETY` in
/// their message; callers classify on that marker.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Continue `history` with `message` as the live user turn and return the reply.
    async fn generate(&self, history: &[ConversationTurn], message: &str) -> Result<String>;

    /// Provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}
