//! Summary pipeline orchestration

use std::sync::Arc;

use tracing::info;

use crate::config::PipelineSettings;
use crate::llm::LlmProvider;
use crate::summary::error::{Result, SummaryError};
use crate::summary::models::{ActionItem, MeetingSummary};
use crate::summary::schema::DecisionsAndTopics;
use crate::summary::stages::{ActionItemStructurer, DecisionTopicClassifier, RawActionExtractor};

/// State threaded through one run. Each field is written once, by one stage.
#[derive(Debug)]
pub struct PipelineState {
    transcript: String,
    decisions_and_topics: Option<DecisionsAndTopics>,
    raw_action_items: Option<Vec<String>>,
    action_items: Option<Vec<ActionItem>>,
}

impl PipelineState {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            decisions_and_topics: None,
            raw_action_items: None,
            action_items: None,
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn raw_action_items(&self) -> Option<&[String]> {
        self.raw_action_items.as_deref()
    }

    pub fn set_decisions_and_topics(&mut self, value: DecisionsAndTopics) -> Result<()> {
        write_once(&mut self.decisions_and_topics, value, "decisions_and_topics")
    }

    pub fn set_raw_action_items(&mut self, value: Vec<String>) -> Result<()> {
        write_once(&mut self.raw_action_items, value, "raw_action_items")
    }

    pub fn set_action_items(&mut self, value: Vec<ActionItem>) -> Result<()> {
        write_once(&mut self.action_items, value, "action_items")
    }

    /// Assemble the final summary, dropping the intermediate fields.
    pub fn into_summary(self) -> Result<MeetingSummary> {
        let decisions_and_topics = self
            .decisions_and_topics
            .ok_or(SummaryError::MissingField("decisions_and_topics"))?;
        let action_items = self
            .action_items
            .ok_or(SummaryError::MissingField("action_items"))?;

        Ok(MeetingSummary {
            key_decisions: decisions_and_topics.key_decisions,
            key_topics: decisions_and_topics.key_topics,
            action_items,
        })
    }
}

fn write_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<()> {
    if slot.is_some() {
        return Err(SummaryError::FieldAlreadySet(field));
    }
    *slot = Some(value);
    Ok(())
}

/// Fixed three-stage pipeline: classify, extract raw actions, structure actions.
pub struct SummaryPipeline {
    classifier: DecisionTopicClassifier,
    extractor: RawActionExtractor,
    structurer: ActionItemStructurer,
    concurrent_extraction: bool,
}

impl SummaryPipeline {
    /// Create a sequential pipeline backed by `provider`
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            classifier: DecisionTopicClassifier::new(provider.clone()),
            extractor: RawActionExtractor::new(provider.clone()),
            structurer: ActionItemStructurer::new(provider),
            concurrent_extraction: false,
        }
    }

    /// Create a pipeline configured from settings
    pub fn from_settings(provider: Arc<dyn LlmProvider>, settings: &PipelineSettings) -> Self {
        Self::new(provider).with_concurrent_extraction(settings.concurrent_extraction)
    }

    /// Issue the two transcript stages at the same time.
    pub fn with_concurrent_extraction(mut self, enabled: bool) -> Self {
        self.concurrent_extraction = enabled;
        self
    }

    /// Summarize one transcript.
    pub async fn summarize(&self, transcript: &str) -> Result<MeetingSummary> {
        info!(
            "Summarizing transcript of length: {} (concurrent extraction: {})",
            transcript.len(),
            self.concurrent_extraction
        );

        let mut state = PipelineState::new(transcript);

        if self.concurrent_extraction {
            let (decisions_and_topics, raw_action_items) = tokio::join!(
                self.classifier.classify(state.transcript()),
                self.extractor.extract(state.transcript())
            );
            state.set_decisions_and_topics(decisions_and_topics?)?;
            state.set_raw_action_items(raw_action_items?)?;
        } else {
            let decisions_and_topics = self.classifier.classify(state.transcript()).await?;
            state.set_decisions_and_topics(decisions_and_topics)?;

            let raw_action_items = self.extractor.extract(state.transcript()).await?;
            state.set_raw_action_items(raw_action_items)?;
        }

        let raw_action_items = state.raw_action_items().unwrap_or_default();
        let action_items = self.structurer.structure(raw_action_items).await?;
        state.set_action_items(action_items)?;

        let summary = state.into_summary()?;
        info!(
            decisions = summary.key_decisions.len(),
            topics = summary.key_topics.len(),
            action_items = summary.action_items.len(),
            "Summary complete"
        );

        Ok(summary)
    }
}
