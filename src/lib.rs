//! recap - turn meeting transcripts into decisions, topics, and action items
//!
//! The summary is produced by three chained calls to a text-completion model;
//! see [`summary::SummaryPipeline`].

pub mod cli;
pub mod config;
pub mod llm;
pub mod summary;
pub mod testing;

pub use summary::{summarize, MeetingSummary, SummaryError, SummaryPipeline};

