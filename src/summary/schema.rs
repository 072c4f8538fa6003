//! Reply schemas for each stage and the parser that validates model output against them.
//!
//! Every stage declares the JSON object it expects as a plain Rust type. The same type
//! drives both the format instructions appended to the prompt (via `schemars`) and the
//! validation of the reply (via `serde`).

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::summary::models::{ActionItem, Decision};

/// Reply of the decision & topic stage.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DecisionsAndTopics {
    /// A list of all final, binding decisions made and who proposed them
    pub key_decisions: Vec<Decision>,

    /// A list of 3-5 major discussion subjects
    pub key_topics: Vec<String>,
}

/// Reply of the raw action line stage.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RawActionItems {
    /// A list of raw sentences from the transcript that imply a future action, task, or
    /// follow-up is required. Include announcements for future meetings or events
    pub raw_action_items: Vec<String>,
}

/// Reply of the action item structuring stage.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StructuredActionItems {
    /// The final list of structured action items
    pub action_items: Vec<ActionItem>,
}

/// Why a model reply could not be turned into the expected type.
#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("reply is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("reply does not match the expected schema: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Render the machine-readable format instruction for `T`.
pub fn format_instructions<T: JsonSchema>() -> String {
    let schema = schema_for!(T);
    let rendered = serde_json::to_string_pretty(&schema).unwrap_or_default();

    format!(
        "Respond with a single JSON object that conforms to the JSON schema below. \
Return only the JSON instance, not the schema itself, and no prose.\n\
\n\
Here is the output schema:\n\
```\n\
{rendered}\n\
```"
    )
}

/// Parse a raw model reply into `T`.
pub fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T, ReplyError> {
    let cleaned = strip_markdown_json(text);
    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(ReplyError::NotJson)?;
    serde_json::from_value(value).map_err(ReplyError::Shape)
}

/// Strip a Markdown code fence (```json ... ``` or ``` ... ```) around a reply.
fn strip_markdown_json(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);

    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_instructions_describe_fields() {
        let text = format_instructions::<DecisionsAndTopics>();
        assert!(text.contains("key_decisions"));
        assert!(text.contains("key_topics"));
        assert!(text.contains("mover"));
        assert!(text.contains("3-5 major discussion subjects"));
    }

    #[test]
    fn strips_json_code_fence() {
        let reply = "```json\n{\"raw_action_items\": [\"Ship it.\"]}\n```";
        let parsed: RawActionItems = parse_reply(reply).unwrap();
        assert_eq!(parsed.raw_action_items, vec!["Ship it."]);
    }

    #[test]
    fn strips_bare_code_fence() {
        assert_eq!(strip_markdown_json("```\n{}\n```"), "{}");
        assert_eq!(strip_markdown_json("  {}  "), "{}");
    }

    #[test]
    fn invalid_json_is_not_json_error() {
        let err = parse_reply::<RawActionItems>("not json at all").unwrap_err();
        assert!(matches!(err, ReplyError::NotJson(_)));
    }

    #[test]
    fn missing_field_is_shape_error() {
        let err = parse_reply::<StructuredActionItems>(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, ReplyError::Shape(_)));

        let err = parse_reply::<StructuredActionItems>("[]").unwrap_err();
        assert!(matches!(err, ReplyError::Shape(_)));
    }

    #[test]
    fn action_item_without_deadline_parses_as_none() {
        let parsed: StructuredActionItems = parse_reply(
            r#"{"action_items":[{"task":"file the report","speaker":"Alice"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.action_items[0].deadline, None);
    }
}
