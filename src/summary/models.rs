//! Data models for meeting summaries

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A final, binding decision taken in the meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    /// The final decision or resolution
    pub decision: String,

    /// The person who moved the motion or was primarily responsible for the decision.
    /// Null if the transcript does not name them
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub mover: Option<String>,
}

/// A structured follow-up task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActionItem {
    /// A clear, concise description of the task
    pub task: String,

    /// The stated deadline (e.g. 'Tuesday, July 16 at noon'). Null if not explicit
    #[serde(default)]
    pub deadline: Option<String>,

    /// The person who gave the instruction or assigned the task
    pub speaker: String,
}

/// Final output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeetingSummary {
    pub key_decisions: Vec<Decision>,
    pub key_topics: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

impl MeetingSummary {
    /// Check if the summary has any content
    pub fn is_empty(&self) -> bool {
        self.key_decisions.is_empty() && self.key_topics.is_empty() && self.action_items.is_empty()
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
