//! LLM module for recap
//!
//! Wraps the text-completion service behind [`LlmProvider`] and holds the
//! prompts the summary stages send to it.

mod client;
mod gemini;
pub mod prompts;

pub use client::{build_provider, CompletionRequest, LlmProvider};
pub use gemini::GeminiClient;
