//! Message entities and the content dispatcher that maps each entity to
//! the display model the UI can render.

mod avatar;
mod factory;
mod message;

pub use avatar::{Avatar, AvatarEntity, AvatarLoader, AvatarSize, PlaceholderAvatarLoader};
pub use factory::{MessageModel, MessageModelFactory, TextMessageModel, UnsupportedMessageModel};
pub use message::{Chat, Message, MessageContent, PhotoContent, StickerContent, TextContent, User};
