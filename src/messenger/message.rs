use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account, as resolved by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Display name: "First Last".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A chat or channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: String,
}

/// Payload variants a message can carry, tagged by content kind.
///
/// Only `Text` gets a dedicated display model; every other kind,
/// including ones added later, falls through to the unsupported arm of
/// the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageContent {
    Text(TextContent),
    Photo(PhotoContent),
    Sticker(StickerContent),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoContent {
    pub caption: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerContent {
    pub emoji: String,
}

/// A message entity: content plus the resolved chat and, when the author
/// is a person rather than the chat itself, the sending user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat: Chat,
    /// None for channel posts, where the chat authors the message.
    pub sender: Option<User>,
    pub content: MessageContent,
    pub date: DateTime<Utc>,
}
