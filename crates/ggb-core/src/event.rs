//! Inbound webhook events.
//!
//! Only the handful of `Update` fields the bot reads are modelled. Parsing is
//! lenient: unknown fields are ignored and everything optional stays optional,
//! so odd update shapes degrade to `Unsupported` instead of failing.

use serde::Deserialize;

use crate::{
    domain::{ChatId, ChatKind, UserId},
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    Message(IncomingMessage),
    EditedMessage(IncomingMessage),
    InlineQuery(IncomingInlineQuery),
    /// Anything else Telegram may deliver (callbacks, joins, polls, ...).
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub chat_kind: ChatKind,
    pub user_id: Option<UserId>,
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingInlineQuery {
    pub id: String,
    pub user_id: Option<UserId>,
    pub query: String,
}

#[derive(Debug, Deserialize)]
struct RawUpdate {
    message: Option<RawMessage>,
    edited_message: Option<RawMessage>,
    inline_query: Option<RawInlineQuery>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    chat: RawChat,
    from: Option<RawUser>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: i64,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct RawInlineQuery {
    id: String,
    from: Option<RawUser>,
    #[serde(default)]
    query: String,
}

impl From<RawMessage> for IncomingMessage {
    fn from(m: RawMessage) -> Self {
        Self {
            chat_id: ChatId(m.chat.id),
            chat_kind: ChatKind::parse(m.chat.kind.as_deref()),
            user_id: m.from.map(|u| UserId(u.id)),
            text: m.text,
        }
    }
}

impl InboundEvent {
    /// Parse a raw webhook body. Inline queries take precedence, then new
    /// messages, then edits.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let raw: RawUpdate = serde_json::from_slice(body)?;

        if let Some(q) = raw.inline_query {
            return Ok(Self::InlineQuery(IncomingInlineQuery {
                id: q.id,
                user_id: q.from.map(|u| UserId(u.id)),
                query: q.query,
            }));
        }
        if let Some(m) = raw.message {
            return Ok(Self::Message(m.into()));
        }
        if let Some(m) = raw.edited_message {
            return Ok(Self::EditedMessage(m.into()));
        }
        Ok(Self::Unsupported)
    }
}
