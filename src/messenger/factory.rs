use std::sync::Arc;

use super::avatar::{Avatar, AvatarEntity, AvatarLoader, AvatarSize};
use super::message::{Message, MessageContent};

/// Display model for a single message, one variant per renderable kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageModel {
    Text(TextMessageModel),
    Unsupported(UnsupportedMessageModel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMessageModel {
    pub message_id: i64,
    pub author_name: String,
    pub avatar: Avatar,
    pub text: String,
}

/// Back-reference only. Nothing is resolved for content the UI cannot
/// render, so unsupported messages never hit the avatar loader.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedMessageModel {
    pub message_id: i64,
}

/// Maps a message entity to exactly one display model, keyed on the
/// content tag.
pub struct MessageModelFactory {
    avatar_loader: Arc<dyn AvatarLoader>,
}

impl MessageModelFactory {
    pub fn new(avatar_loader: Arc<dyn AvatarLoader>) -> Self {
        Self { avatar_loader }
    }

    /// Total over every content kind: anything but text falls through to
    /// the unsupported variant.
    pub fn create_message(&self, message: &Message) -> MessageModel {
        match &message.content {
            MessageContent::Text(content) => self.create_text_message(message, &content.text),
            _ => MessageModel::Unsupported(UnsupportedMessageModel {
                message_id: message.id,
            }),
        }
    }

    fn create_text_message(&self, message: &Message, text: &str) -> MessageModel {
        // Author precedence: the sending user when there is one,
        // otherwise the chat or channel itself.
        let (author_name, entity) = match &message.sender {
            Some(user) => (user.display_name(), AvatarEntity::User(user)),
            None => (message.chat.title.clone(), AvatarEntity::Chat(&message.chat)),
        };
        let avatar = self.avatar_loader.get_avatar(entity, AvatarSize::Big);

        MessageModel::Text(TextMessageModel {
            message_id: message.id,
            author_name,
            avatar,
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messenger::message::{Chat, StickerContent, TextContent, User};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts lookups so tests can assert the unsupported arm never
    /// touches the loader.
    struct CountingLoader {
        lookups: AtomicUsize,
    }

    impl CountingLoader {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                lookups: AtomicUsize::new(0),
            })
        }
    }

    impl AvatarLoader for CountingLoader {
        fn get_avatar(&self, entity: AvatarEntity<'_>, size: AvatarSize) -> Avatar {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Avatar {
                entity_id: entity.id(),
                label: String::new(),
                color: 0,
                size,
            }
        }
    }

    fn chat() -> Chat {
        Chat {
            id: 7,
            title: "Analytical Engines".to_string(),
        }
    }

    fn text_message(sender: Option<User>) -> Message {
        Message {
            id: 1001,
            chat: chat(),
            sender,
            content: MessageContent::Text(TextContent {
                text: "hello there".to_string(),
            }),
            date: Utc::now(),
        }
    }

    #[test]
    fn text_from_user_resolves_full_name_and_big_avatar() {
        let loader = CountingLoader::new();
        let factory = MessageModelFactory::new(loader.clone());

        let message = text_message(Some(User {
            id: 42,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }));

        match factory.create_message(&message) {
            MessageModel::Text(model) => {
                assert_eq!(model.author_name, "Ada Lovelace");
                assert_eq!(model.text, "hello there");
                assert_eq!(model.avatar.entity_id, 42);
                assert_eq!(model.avatar.size, AvatarSize::Big);
            }
            other => panic!("expected text model, got {:?}", other),
        }
        assert_eq!(loader.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn text_without_user_falls_back_to_chat_title() {
        let factory = MessageModelFactory::new(CountingLoader::new());
        let message = text_message(None);

        match factory.create_message(&message) {
            MessageModel::Text(model) => {
                assert_eq!(model.author_name, "Analytical Engines");
                assert_eq!(model.avatar.entity_id, 7);
            }
            other => panic!("expected text model, got {:?}", other),
        }
    }

    #[test]
    fn other_tags_map_to_unsupported_without_avatar_lookup() {
        let loader = CountingLoader::new();
        let factory = MessageModelFactory::new(loader.clone());

        for content in [
            MessageContent::Sticker(StickerContent {
                emoji: "🎉".to_string(),
            }),
            MessageContent::Unknown,
        ] {
            let mut message = text_message(None);
            message.content = content;

            match factory.create_message(&message) {
                MessageModel::Unsupported(model) => assert_eq!(model.message_id, 1001),
                other => panic!("expected unsupported model, got {:?}", other),
            }
        }
        assert_eq!(loader.lookups.load(Ordering::SeqCst), 0);
    }
}
