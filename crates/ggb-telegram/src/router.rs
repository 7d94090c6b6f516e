use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    response::Json,
    routing::{any, get},
    Router,
};
use serde_json::{json, Value};
use teloxide::Bot;
use tracing::{debug, info, warn};

use ggb_core::{
    config::Config,
    cooldown::MemoryCooldown,
    dispatch::Dispatcher,
    event::InboundEvent,
    messaging::port::{deliver, ReplyEmitter},
};

use crate::TelegramEmitter;

pub struct AppState {
    pub dispatcher: Dispatcher,
    /// `None` when no bot token is configured: requests are acknowledged but
    /// never processed.
    pub emitter: Option<Arc<dyn ReplyEmitter>>,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> Self {
        let emitter = cfg.telegram_bot_token.as_ref().map(|token| {
            Arc::new(TelegramEmitter::new(Bot::new(token.clone()))) as Arc<dyn ReplyEmitter>
        });
        if emitter.is_none() {
            warn!("TELEGRAM_BOT_TOKEN is not set; webhook will acknowledge updates without replying");
        }

        Self {
            dispatcher: Dispatcher::new(Arc::new(MemoryCooldown::new(cfg.cooldown_window))),
            emitter,
        }
    }
}

pub fn build_router(webhook_path: &str, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(webhook_path, any(webhook_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(cfg: Arc<Config>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&cfg));
    let app = build_router(&cfg.webhook_path, state);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr.as_str()).await?;
    info!(addr = %cfg.bind_addr, path = %cfg.webhook_path, "ggb webhook listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Telegram webhook. Always answers 200 so the platform never retries.
async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Json<Value> {
    if method != Method::POST {
        return Json(json!({ "ok": true, "method": method.as_str() }));
    }

    let Some(emitter) = state.emitter.clone() else {
        return Json(json!({ "ok": false, "error": "no token" }));
    };

    let event = match InboundEvent::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "ignoring unparseable update");
            return Json(json!({ "ok": true }));
        }
    };

    let outcome = state.dispatcher.dispatch(&event);
    if let Some(outbound) = &outcome.reply {
        deliver(emitter.as_ref(), outbound).await;
    }

    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use async_trait::async_trait;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use ggb_core::{
        domain::ChatId,
        errors::Error,
        messaging::types::{InlineArticle, ReplyPayload},
    };

    use super::*;

    const PATH: &str = "/api/gorboy-bot";

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Message(i64, String),
        Inline(String, usize),
    }

    #[derive(Default)]
    struct RecordingEmitter {
        sent: Mutex<Vec<Sent>>,
        fail: bool,
    }

    impl RecordingEmitter {
        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplyEmitter for RecordingEmitter {
        async fn send_message(
            &self,
            chat_id: ChatId,
            payload: &ReplyPayload,
        ) -> ggb_core::Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push(Sent::Message(chat_id.0, payload.text.clone()));
            if self.fail {
                return Err(Error::External("telegram error: boom".to_string()));
            }
            Ok(())
        }

        async fn answer_inline_query(
            &self,
            query_id: &str,
            results: &[InlineArticle],
        ) -> ggb_core::Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push(Sent::Inline(query_id.to_string(), results.len()));
            Ok(())
        }
    }

    fn app_with(emitter: Option<Arc<RecordingEmitter>>) -> Router {
        let state = AppState {
            dispatcher: Dispatcher::new(Arc::new(MemoryCooldown::new(Duration::from_millis(
                5000,
            )))),
            emitter: emitter.map(|e| e as Arc<dyn ReplyEmitter>),
        };
        build_router(PATH, Arc::new(state))
    }

    async fn call(app: Router, method: &str, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn message(chat_type: &str, text: &str) -> String {
        json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "date": 0,
                "chat": {"id": 42, "type": chat_type},
                "from": {"id": 9, "is_bot": false, "first_name": "g"},
                "text": text
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn get_is_acknowledged_without_processing() {
        let emitter = Arc::new(RecordingEmitter::default());
        let (status, body) = call(app_with(Some(emitter.clone())), "GET", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true, "method": "GET"}));
        assert!(emitter.sent().is_empty());
    }

    #[tokio::test]
    async fn missing_token_degrades_to_ack() {
        let (status, body) = call(app_with(None), "POST", &message("private", "$GGT")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": false, "error": "no token"}));
    }

    #[tokio::test]
    async fn malformed_body_is_acknowledged() {
        let emitter = Arc::new(RecordingEmitter::default());
        let (status, body) = call(app_with(Some(emitter.clone())), "POST", "{nope").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));
        assert!(emitter.sent().is_empty());
    }

    #[tokio::test]
    async fn ticker_mention_is_answered_once_per_window() {
        let emitter = Arc::new(RecordingEmitter::default());
        let app = app_with(Some(emitter.clone()));

        let (_, body) = call(app.clone(), "POST", &message("group", "wen $GORBOY")).await;
        assert_eq!(body, json!({"ok": true}));
        let (_, body) = call(app, "POST", &message("group", "wen $GORBOY")).await;
        assert_eq!(body, json!({"ok": true}));

        let sent = emitter.sent();
        assert_eq!(sent.len(), 1);
        let Sent::Message(chat_id, text) = &sent[0] else {
            panic!("expected a message");
        };
        assert_eq!(*chat_id, 42);
        assert!(text.contains("DYOR SNAPSHOT"));
    }

    #[tokio::test]
    async fn group_noise_stays_silent() {
        let emitter = Arc::new(RecordingEmitter::default());
        let (status, body) = call(
            app_with(Some(emitter.clone())),
            "POST",
            &message("supergroup", "good morning"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));
        assert!(emitter.sent().is_empty());
    }

    #[tokio::test]
    async fn inline_query_is_answered() {
        let emitter = Arc::new(RecordingEmitter::default());
        let update = json!({
            "update_id": 2,
            "inline_query": {"id": "iq", "from": {"id": 9}, "query": "$ggt", "offset": ""}
        })
        .to_string();
        let (_, body) = call(app_with(Some(emitter.clone())), "POST", &update).await;
        assert_eq!(body, json!({"ok": true}));
        assert_eq!(emitter.sent(), vec![Sent::Inline("iq".to_string(), 1)]);
    }

    #[tokio::test]
    async fn delivery_failure_still_acknowledges() {
        let emitter = Arc::new(RecordingEmitter {
            fail: true,
            ..RecordingEmitter::default()
        });
        let (status, body) = call(
            app_with(Some(emitter.clone())),
            "POST",
            &message("private", "/help"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));
        assert_eq!(emitter.sent().len(), 1);
    }

    #[tokio::test]
    async fn health() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app_with(None).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
