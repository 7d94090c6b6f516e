/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Chat category as reported by Telegram's `chat.type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    Unknown,
}

impl ChatKind {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("private") => Self::Private,
            Some("group") => Self::Group,
            Some("supergroup") => Self::Supergroup,
            Some("channel") => Self::Channel,
            _ => Self::Unknown,
        }
    }

    /// Anything that isn't a one-on-one chat. Unknown kinds count as groups so
    /// the bot stays quiet when unsure.
    pub fn is_group_like(self) -> bool {
        !matches!(self, Self::Private)
    }
}
