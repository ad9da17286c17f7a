use super::message::{Chat, User};

/// Size variant requested from the avatar loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarSize {
    Small,
    Big,
}

/// Entity an avatar is looked up for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvatarEntity<'a> {
    User(&'a User),
    Chat(&'a Chat),
}

impl AvatarEntity<'_> {
    pub fn id(&self) -> i64 {
        match self {
            AvatarEntity::User(user) => user.id,
            AvatarEntity::Chat(chat) => chat.id,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            AvatarEntity::User(user) => user.display_name(),
            AvatarEntity::Chat(chat) => chat.title.clone(),
        }
    }
}

/// Resolved avatar reference; the renderer decides how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub entity_id: i64,
    /// Initials fallback shown when no picture is available.
    pub label: String,
    /// Stable xterm-256 swatch derived from the entity.
    pub color: u8,
    pub size: AvatarSize,
}

/// Avatar lookup boundary. Purely a lookup; the dispatcher assumes no
/// side effects.
pub trait AvatarLoader: Send + Sync {
    fn get_avatar(&self, entity: AvatarEntity<'_>, size: AvatarSize) -> Avatar;
}

/// Deterministic placeholder loader: initials plus a color swatch keyed
/// on the entity id, good enough for terminal rendering.
pub struct PlaceholderAvatarLoader;

impl AvatarLoader for PlaceholderAvatarLoader {
    fn get_avatar(&self, entity: AvatarEntity<'_>, size: AvatarSize) -> Avatar {
        let name = entity.display_name();
        let label: String = name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase();

        Avatar {
            entity_id: entity.id(),
            label,
            // 216-color cube, skipping the 16 base colors.
            color: (entity.id().unsigned_abs() % 216 + 16) as u8,
            size,
        }
    }
}
