//! Telegram adapter (teloxide) + webhook endpoint (axum).
//!
//! This crate implements the `ggb-core` ReplyEmitter over the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{
        InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResult, InlineQueryResultArticle,
        InputMessageContent, InputMessageContentText, ParseMode,
    },
};

pub mod router;

use ggb_core::{
    domain::ChatId,
    errors::Error,
    messaging::{
        port::ReplyEmitter,
        types::{InlineArticle, InlineKeyboard, ReplyPayload},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramEmitter {
    bot: Bot,
}

impl TelegramEmitter {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    fn markup(keyboard: &InlineKeyboard) -> Result<InlineKeyboardMarkup> {
        let rows = keyboard
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| {
                        let url = reqwest::Url::parse(&b.url).map_err(|e| {
                            Error::External(format!("invalid button url {}: {e}", b.url))
                        })?;
                        Ok(InlineKeyboardButton::url(b.label.clone(), url))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(InlineKeyboardMarkup::new(rows))
    }

    fn article(a: &InlineArticle) -> Result<InlineQueryResult> {
        let mut content = InputMessageContentText::new(a.body.text.clone());
        if a.body.formatted {
            content = content.parse_mode(ParseMode::Html);
        }
        if a.body.disable_preview {
            content = content.disable_web_page_preview(true);
        }

        let mut article = InlineQueryResultArticle::new(
            a.id.clone(),
            a.title.clone(),
            InputMessageContent::Text(content),
        )
        .description(a.description.clone());
        if let Some(kb) = &a.body.keyboard {
            article = article.reply_markup(Self::markup(kb)?);
        }

        Ok(InlineQueryResult::Article(article))
    }
}

#[async_trait]
impl ReplyEmitter for TelegramEmitter {
    async fn send_message(&self, chat_id: ChatId, payload: &ReplyPayload) -> Result<()> {
        let mut req = self
            .bot
            .send_message(Self::tg_chat(chat_id), payload.text.clone());
        if payload.formatted {
            req = req.parse_mode(ParseMode::Html);
        }
        if payload.disable_preview {
            req = req.disable_web_page_preview(true);
        }
        if let Some(kb) = &payload.keyboard {
            req = req.reply_markup(Self::markup(kb)?);
        }

        req.await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn answer_inline_query(&self, query_id: &str, results: &[InlineArticle]) -> Result<()> {
        let results = results
            .iter()
            .map(Self::article)
            .collect::<Result<Vec<_>>>()?;

        self.bot
            .answer_inline_query(query_id.to_string(), results)
            .cache_time(0)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
