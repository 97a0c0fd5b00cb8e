//! Editor-facing completion engine on top of `analyzer`.
//!
//! Requests are resolved on tokio's blocking pool. Each request takes a new generation
//! number and only the newest generation is ever published.

mod completion;
mod config;
mod engine;
mod error;

pub use completion::CompletionItem;
pub use config::EngineConfig;
pub use engine::{CompletionEngine, CompletionSnapshot};
pub use error::IdeError;

#[cfg(test)]
mod tests;
