use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Whether the bot asked for the hours of one weekday or of a weekday range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingKind {
    Single,
    Range,
}

/// A time-range question the bot asked and is waiting to have answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTimeInput {
    #[serde(deserialize_with = "conversation_id")]
    pub conversation_id: String,
    pub kind: PendingKind,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start_day: Option<String>,
    #[serde(default)]
    pub end_day: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Opaque state of a multi-step selection dialog in the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSelection {
    #[serde(deserialize_with = "conversation_id")]
    pub conversation_id: String,
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for POST /api/daily/zeiten/pending.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPendingRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub clear: bool,
    #[serde(default, deserialize_with = "optional_conversation_id")]
    pub conversation_id: Option<String>,
    pub kind: Option<PendingKind>,
    pub day: Option<String>,
    pub start_day: Option<String>,
    pub end_day: Option<String>,
}

/// Body for POST /api/daily/zeiten/apply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPendingRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default, deserialize_with = "conversation_id")]
    pub conversation_id: String,
    #[serde(default)]
    pub text: String,
}

/// Body for POST /api/daily/selection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSelectionRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub clear: bool,
    #[serde(default, deserialize_with = "optional_conversation_id")]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub data: Value,
}

/// Chat ids arrive as numbers from some bot frameworks and as strings from others.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn conversation_id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    RawId::deserialize(de).map(String::from)
}

fn optional_conversation_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(de)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_chat_ids_become_strings() {
        let req: ApplyPendingRequest =
            serde_json::from_str(r#"{"secret":"s","conversationId":-100123,"text":"9:00-18:00"}"#)
                .unwrap();
        assert_eq!(req.conversation_id, "-100123");

        let req: SetPendingRequest = serde_json::from_str(r#"{"secret":"s","clear":true}"#).unwrap();
        assert!(req.clear);
        assert_eq!(req.conversation_id, None);
    }
}
