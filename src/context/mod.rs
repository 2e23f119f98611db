// Context assembly for the priming turn
//
// Merges the static context with the latest scrape snapshot into the single
// text block the model sees before the conversation.

pub mod builder;

pub use builder::{assemble, ContextBuilder};
