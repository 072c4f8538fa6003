//! Meeting summary pipeline
//!
//! Three model calls in a fixed order, threaded through one [`PipelineState`]:
//! decisions & topics, raw action sentences, then structured action items.

mod error;
pub mod models;
mod pipeline;
pub mod schema;
mod stages;

pub use error::{Result, SummaryError};
pub use models::{ActionItem, Decision, MeetingSummary};
pub use pipeline::{PipelineState, SummaryPipeline};
pub use schema::{DecisionsAndTopics, ReplyError};
pub use stages::{ActionItemStructurer, DecisionTopicClassifier, PipelineStage, RawActionExtractor};

use std::sync::Arc;

use crate::llm::LlmProvider;

/// Summarize a transcript with a sequential pipeline over `provider`.
pub async fn summarize(provider: Arc<dyn LlmProvider>, transcript: &str) -> Result<MeetingSummary> {
    SummaryPipeline::new(provider).summarize(transcript).await
}
