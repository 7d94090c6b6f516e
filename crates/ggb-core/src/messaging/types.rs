use crate::domain::ChatId;

/// Inline keyboard made of URL buttons, laid out row by row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub url: String,
}

impl InlineButton {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self { rows }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.rows.iter().flatten()
    }
}

/// A message body plus optional extras.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyPayload {
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
    /// Render `text` as Telegram HTML.
    pub formatted: bool,
    pub disable_preview: bool,
}

impl ReplyPayload {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            formatted: false,
            disable_preview: false,
        }
    }

    /// `text` must already be escaped where it embeds user input.
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            formatted: true,
            ..Self::plain(text)
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn without_preview(mut self) -> Self {
        self.disable_preview = true;
        self
    }
}

/// One article in an inline-query answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub body: ReplyPayload,
}

/// Something the dispatcher wants delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    Message {
        chat_id: ChatId,
        payload: ReplyPayload,
    },
    InlineAnswer {
        query_id: String,
        results: Vec<InlineArticle>,
    },
}
