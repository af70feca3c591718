use serde::{Deserialize, Serialize};
use serde_json::Value;

// Relay endpoint request format
#[derive(Deserialize, Clone, Default)]
pub struct ChatRequest {
    // kept as a raw JSON value so the handler can tell "missing or not a
    // string" apart from "empty after trimming"
    #[serde(default)]
    pub message: Option<Value>,

    // prior transcript, only consulted on the summarize path
    #[serde(default)]
    pub messages: Vec<ChatMessage>,

    // rolling conversation memory, only consulted on the chat path
    #[serde(default)]
    pub summary: String,
}

// One transcript entry as the browser client stores it
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    // transcript rendering uses uppercase role labels
    pub fn as_upper(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

// Relay endpoint response format
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    // present (and true) only for summarize replies
    #[serde(rename = "isSummary", skip_serializing_if = "Option::is_none")]
    pub is_summary: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_defaults_optional_fields() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.message.as_ref().and_then(Value::as_str), Some("hi"));
        assert!(req.messages.is_empty());
        assert_eq!(req.summary, "");
    }

    #[test]
    fn chat_request_tolerates_non_string_message() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":42}"#).unwrap();
        assert_eq!(req.message.as_ref().and_then(Value::as_str), None);
    }

    #[test]
    fn transcript_roles_deserialize_lowercase() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","text":"hello"}"#).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.role.as_upper(), "ASSISTANT");
    }

    #[test]
    fn reply_omits_summary_flag_when_absent() {
        let reply = ChatReply {
            reply: "ok".to_string(),
            is_summary: None,
        };
        assert_eq!(serde_json::to_string(&reply).unwrap(), r#"{"reply":"ok"}"#);

        let summary = ChatReply {
            reply: "ok".to_string(),
            is_summary: Some(true),
        };
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"reply":"ok","isSummary":true}"#
        );
    }
}
