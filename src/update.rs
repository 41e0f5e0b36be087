use anyhow::{Context, Result};
use serde::Deserialize;

/// One inbound Telegram update. Only the fields the dispatcher consumes are
/// modeled; everything else the platform sends is ignored by serde.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub edited_message: Option<serde_json::Value>,
    pub channel_post: Option<serde_json::Value>,
    pub callback_query: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Update kind name, used as log context.
    pub fn kind(&self) -> &'static str {
        if self.message.is_some() {
            "message"
        } else if self.edited_message.is_some() {
            "edited_message"
        } else if self.channel_post.is_some() {
            "channel_post"
        } else if self.callback_query.is_some() {
            "callback_query"
        } else {
            "unknown"
        }
    }

    /// Chat id and text when this update is a text-bearing message.
    pub fn text_message(&self) -> Option<(i64, &str)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?;
        Some((message.chat.id, text))
    }

    /// Destination chat for replies, when one exists.
    pub fn chat_id(&self) -> Option<i64> {
        self.message.as_ref().map(|message| message.chat.id)
    }
}

/// Parses a raw webhook body into an [`Update`].
pub fn parse_update(raw: &[u8]) -> Result<Update> {
    serde_json::from_slice(raw).context("Failed to parse incoming update body")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> Update {
        parse_update(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_text_message() {
        let update = parse(serde_json::json!({
            "update_id": 42,
            "message": {
                "message_id": 77,
                "text": "/help",
                "chat": {"id": -200123},
                "from": {"id": 888, "is_bot": false, "first_name": "Alice"}
            }
        }));
        assert_eq!(update.update_id, 42);
        assert_eq!(update.kind(), "message");
        assert_eq!(update.text_message(), Some((-200123, "/help")));
        assert_eq!(update.chat_id(), Some(-200123));
    }

    #[test]
    fn test_message_without_text_is_not_a_text_message() {
        let update = parse(serde_json::json!({
            "update_id": 7,
            "message": {
                "message_id": 1,
                "chat": {"id": 5},
                "photo": [{"file_id": "abc", "width": 10, "height": 10}]
            }
        }));
        assert_eq!(update.kind(), "message");
        assert_eq!(update.text_message(), None);
        assert_eq!(update.chat_id(), Some(5));
    }

    #[test]
    fn test_non_message_update_kinds() {
        let update = parse(serde_json::json!({
            "update_id": 8,
            "callback_query": {"id": "cb1", "data": "noop"}
        }));
        assert_eq!(update.kind(), "callback_query");
        assert_eq!(update.text_message(), None);
        assert_eq!(update.chat_id(), None);

        let update = parse(serde_json::json!({
            "update_id": 9,
            "edited_message": {"message_id": 3, "chat": {"id": 5}, "text": "edited"}
        }));
        assert_eq!(update.kind(), "edited_message");
        assert_eq!(update.text_message(), None);
    }

    #[test]
    fn test_unknown_update_kind() {
        let update = parse(serde_json::json!({
            "update_id": 10,
            "my_chat_member": {"chat": {"id": 5}}
        }));
        assert_eq!(update.kind(), "unknown");
        assert_eq!(update.text_message(), None);
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(parse_update(b"not json").is_err());
        assert!(parse_update(b"{\"no_update_id\": true}").is_err());
        assert!(parse_update(b"").is_err());
    }
}
