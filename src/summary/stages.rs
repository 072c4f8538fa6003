//! The three prompt/parse stages of the summary pipeline.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::llm::prompts::{
    raw_actions_message, transcript_message, CLASSIFIER_SYSTEM, RAW_EXTRACTOR_SYSTEM,
    STRUCTURER_SYSTEM,
};
use crate::llm::{CompletionRequest, LlmProvider};
use crate::summary::error::{Result, SummaryError};
use crate::summary::models::ActionItem;
use crate::summary::schema::{
    format_instructions, parse_reply, DecisionsAndTopics, RawActionItems, ReplyError,
    StructuredActionItems,
};

/// Stages of a summary run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Decisions and topics
    Classify,
    /// Verbatim action sentences
    ExtractRawActions,
    /// Filtered, structured action items
    StructureActions,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::ExtractRawActions => "extract_raw_actions",
            Self::StructureActions => "structure_actions",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Send one request and return the raw reply text.
async fn call_model(
    provider: &dyn LlmProvider,
    stage: PipelineStage,
    system: &str,
    user: &str,
) -> Result<String> {
    let reply = provider
        .complete(CompletionRequest { system, user })
        .await
        .map_err(|error| SummaryError::Provider { stage, error })?;

    debug!(stage = %stage, provider = provider.name(), bytes = reply.len(), "Model replied");
    Ok(reply)
}

/// Send one request and parse the reply, treating a malformed reply as fatal.
async fn ask<T: DeserializeOwned>(
    provider: &dyn LlmProvider,
    stage: PipelineStage,
    system: &str,
    user: &str,
) -> Result<T> {
    let reply = call_model(provider, stage, system, user).await?;
    parse_reply(&reply).map_err(|source| SummaryError::Extraction { stage, source })
}

/// Extracts final decisions (with their mover) and the main discussion topics.
pub struct DecisionTopicClassifier {
    provider: Arc<dyn LlmProvider>,
    format_instructions: String,
}

impl DecisionTopicClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            format_instructions: format_instructions::<DecisionsAndTopics>(),
        }
    }

    pub async fn classify(&self, transcript: &str) -> Result<DecisionsAndTopics> {
        info!("Running decision & topic classifier");
        let user = transcript_message(transcript, &self.format_instructions);
        ask(
            self.provider.as_ref(),
            PipelineStage::Classify,
            CLASSIFIER_SYSTEM,
            &user,
        )
        .await
    }
}

/// Pulls every sentence that implies a follow-up, copied verbatim.
pub struct RawActionExtractor {
    provider: Arc<dyn LlmProvider>,
    format_instructions: String,
}

impl RawActionExtractor {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            format_instructions: format_instructions::<RawActionItems>(),
        }
    }

    pub async fn extract(&self, transcript: &str) -> Result<Vec<String>> {
        info!("Running raw action item extractor");
        let user = transcript_message(transcript, &self.format_instructions);
        let reply: RawActionItems = ask(
            self.provider.as_ref(),
            PipelineStage::ExtractRawActions,
            RAW_EXTRACTOR_SYSTEM,
            &user,
        )
        .await?;
        Ok(reply.raw_action_items)
    }
}

/// Filters raw action sentences and turns the survivors into [`ActionItem`]s.
///
/// A malformed reply degrades to an empty list instead of failing the run.
pub struct ActionItemStructurer {
    provider: Arc<dyn LlmProvider>,
    format_instructions: String,
}

impl ActionItemStructurer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            format_instructions: format_instructions::<StructuredActionItems>(),
        }
    }

    pub async fn structure(&self, raw_action_items: &[String]) -> Result<Vec<ActionItem>> {
        info!(lines = raw_action_items.len(), "Running action item structurer");

        if raw_action_items.is_empty() {
            return Ok(Vec::new());
        }

        let user = raw_actions_message(raw_action_items, &self.format_instructions);
        let reply = call_model(
            self.provider.as_ref(),
            PipelineStage::StructureActions,
            STRUCTURER_SYSTEM,
            &user,
        )
        .await?;

        match parse_reply::<StructuredActionItems>(&reply) {
            Ok(structured) => Ok(structured.action_items),
            Err(err) => {
                log_degraded(&err);
                Ok(Vec::new())
            }
        }
    }
}

fn log_degraded(err: &ReplyError) {
    warn!(
        stage = %PipelineStage::StructureActions,
        "Structurer returned a malformed reply, continuing without action items: {}",
        err
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;

    #[test]
    fn stage_names_match_logs() {
        assert_eq!(PipelineStage::Classify.to_string(), "classify");
        assert_eq!(
            PipelineStage::ExtractRawActions.as_str(),
            "extract_raw_actions"
        );
        assert_eq!(PipelineStage::StructureActions.as_str(), "structure_actions");
    }

    #[tokio::test]
    async fn classifier_sends_transcript_and_schema() {
        let provider = Arc::new(ScriptedProvider::new().reply(
            CLASSIFIER_SYSTEM,
            r#"{"key_decisions":[],"key_topics":["budget"]}"#,
        ));
        let classifier = DecisionTopicClassifier::new(provider.clone());

        let result = classifier.classify("Bob: budget talk").await.unwrap();
        assert_eq!(result.key_topics, vec!["budget"]);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].user.starts_with("Transcript:\nBob: budget talk\n\n"));
        assert!(calls[0].user.contains("key_decisions"));
    }

    #[tokio::test]
    async fn extractor_rejects_wrong_shape() {
        let provider = Arc::new(
            ScriptedProvider::new().reply(RAW_EXTRACTOR_SYSTEM, r#"{"sentences":["x"]}"#),
        );
        let extractor = RawActionExtractor::new(provider);

        let err = extractor.extract("anything").await.unwrap_err();
        assert!(matches!(
            err,
            SummaryError::Extraction {
                stage: PipelineStage::ExtractRawActions,
                source: ReplyError::Shape(_),
            }
        ));
    }

    #[tokio::test]
    async fn structurer_skips_model_without_lines() {
        let provider = Arc::new(ScriptedProvider::new());
        let structurer = ActionItemStructurer::new(provider.clone());

        let items = structurer.structure(&[]).await.unwrap();
        assert!(items.is_empty());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn structurer_degrades_on_garbage() {
        let provider = Arc::new(ScriptedProvider::new().reply(STRUCTURER_SYSTEM, "Sorry, I can't."));
        let structurer = ActionItemStructurer::new(provider);

        let items = structurer
            .structure(&["Carol will book the room.".to_string()])
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn structurer_propagates_transport_failure() {
        let provider =
            Arc::new(ScriptedProvider::new().fail(STRUCTURER_SYSTEM, "connection reset"));
        let structurer = ActionItemStructurer::new(provider);

        let err = structurer
            .structure(&["Carol will book the room.".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.stage(), Some(PipelineStage::StructureActions));
        assert!(err.to_string().contains("connection reset"));
    }
}
