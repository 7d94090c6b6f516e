use async_trait::async_trait;

use crate::{
    domain::ChatId,
    messaging::types::{InlineArticle, Outbound, ReplyPayload},
    Result,
};

/// Outbound transport port.
///
/// Telegram is the only implementation; tests plug in a recorder.
#[async_trait]
pub trait ReplyEmitter: Send + Sync {
    async fn send_message(&self, chat_id: ChatId, payload: &ReplyPayload) -> Result<()>;

    async fn answer_inline_query(&self, query_id: &str, results: &[InlineArticle]) -> Result<()>;
}

/// Deliver one outbound item, best-effort: failures are logged and dropped,
/// never retried.
pub async fn deliver(emitter: &dyn ReplyEmitter, outbound: &Outbound) {
    let res = match outbound {
        Outbound::Message { chat_id, payload } => emitter.send_message(*chat_id, payload).await,
        Outbound::InlineAnswer { query_id, results } => {
            emitter.answer_inline_query(query_id, results).await
        }
    };
    if let Err(e) = res {
        tracing::warn!(error = %e, "reply delivery failed");
    }
}
