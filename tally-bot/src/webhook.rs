//! Webhook intake: Telegram posts updates here, the bookkeeper answers, the
//! messenger delivers. The platform always gets `200 OK` so it never retries.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tally_ledger::Bookkeeper;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::telegram::{Messenger, Update};

const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

#[derive(Clone)]
pub struct AppState {
    pub bookkeeper: Arc<Bookkeeper>,
    pub messenger: Arc<dyn Messenger>,
    /// Required secret header value, if configured
    pub secret: Option<Arc<str>>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/telegram", post(telegram_webhook))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

fn ack() -> Response {
    (StatusCode::OK, "OK").into_response()
}

async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(expected) = state.secret.as_deref() {
        let given = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        if given != Some(expected) {
            warn!("rejected webhook: missing or wrong secret token");
            return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            debug!(error = %e, "ignoring webhook body that is not an update");
            return ack();
        }
    };

    let Some((text, chat_id)) = update.text_and_chat() else {
        debug!("update without text or chat id");
        return ack();
    };

    let reply = match state.bookkeeper.respond(text, &chat_id.to_string()).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(chat_id, error = ?e, "failed to handle message");
            state.bookkeeper.fallback()
        }
    };

    if let Err(e) = state.messenger.send_text(chat_id, &reply).await {
        error!(chat_id, error = ?e, "failed to deliver reply");
    }

    ack()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use tally_core::lexicon::ENGLISH;
    use tally_core::{Composer, FixedClock, FixedPicker, Interpreter, Language};
    use tally_ledger::{LedgerStore, MemoryLedger};
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<(i64, String)>>,
    }

    impl RecordingMessenger {
        fn sent(&self) -> Vec<(i64, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    struct DownMessenger;

    #[async_trait]
    impl Messenger for DownMessenger {
        async fn send_text(&self, _chat_id: i64, _text: &str) -> Result<()> {
            bail!("telegram unreachable")
        }
    }

    struct DownStore;

    #[async_trait]
    impl LedgerStore for DownStore {
        async fn append(&self, _row: Vec<String>) -> Result<()> {
            bail!("sheet unreachable")
        }

        async fn rows(&self) -> Result<Vec<Vec<String>>> {
            bail!("sheet unreachable")
        }
    }

    fn bookkeeper(store: Arc<dyn LedgerStore>) -> Arc<Bookkeeper> {
        let today = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        Arc::new(Bookkeeper::new(
            Interpreter::new(&ENGLISH, Arc::new(FixedClock(today))),
            Composer::new(Language::English, FixedPicker(0)),
            store,
        ))
    }

    fn state(
        store: Arc<dyn LedgerStore>,
        messenger: Arc<dyn Messenger>,
        secret: Option<&str>,
    ) -> AppState {
        AppState {
            bookkeeper: bookkeeper(store),
            messenger,
            secret: secret.map(Arc::from),
        }
    }

    fn update(text: &str, chat_id: i64) -> Request<Body> {
        let body = serde_json::json!({
            "update_id": 1,
            "message": {"message_id": 1, "text": text, "chat": {"id": chat_id}}
        });
        Request::builder()
            .method("POST")
            .uri("/telegram")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_record_message_is_stored_and_answered() {
        let store = Arc::new(MemoryLedger::new());
        let messenger = Arc::new(RecordingMessenger::default());
        let app = create_router(state(store.clone(), messenger.clone(), None));

        let resp = app.oneshot(update("Spent 2000 on food", 12345)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "OK");
        assert_eq!(store.len(), 1);
        assert_eq!(
            messenger.sent(),
            vec![(12345, "✅ Done, logged under Food. Nice tracking! 💸".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unrecognized_message_gets_fallback() {
        let store = Arc::new(MemoryLedger::new());
        let messenger = Arc::new(RecordingMessenger::default());
        let app = create_router(state(store.clone(), messenger.clone(), None));

        let resp = app.oneshot(update("gibberish xyz", 7)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(store.is_empty());
        assert_eq!(
            messenger.sent(),
            vec![(7, "😕 I didn't quite get that. Try something like: 'Spent 2000 on food'".to_string())]
        );
    }

    #[tokio::test]
    async fn test_updates_without_text_are_acknowledged_silently() {
        let store = Arc::new(MemoryLedger::new());
        let messenger = Arc::new(RecordingMessenger::default());
        let app = create_router(state(store.clone(), messenger.clone(), None));

        for body in [
            r#"{"message": {"chat": {"id": 1}, "sticker": {}}}"#,
            r#"{"message": {"text": "total"}}"#,
            r#"{}"#,
            "not json at all",
        ] {
            let req = Request::builder()
                .method("POST")
                .uri("/telegram")
                .body(Body::from(body))
                .unwrap();
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        assert!(messenger.sent().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_still_acknowledges_and_replies() {
        let messenger = Arc::new(RecordingMessenger::default());
        let app = create_router(state(Arc::new(DownStore), messenger.clone(), None));

        let resp = app.oneshot(update("Spent 2000 on food", 3)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 3);
    }

    #[tokio::test]
    async fn test_delivery_failure_still_acknowledges() {
        let store = Arc::new(MemoryLedger::new());
        let app = create_router(state(store.clone(), Arc::new(DownMessenger), None));

        let resp = app.oneshot(update("Spent 2000 on food", 3)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_secret_token_is_enforced() {
        let store = Arc::new(MemoryLedger::new());
        let messenger = Arc::new(RecordingMessenger::default());
        let app = create_router(state(store.clone(), messenger.clone(), Some("s3cret")));

        let resp = app.clone().oneshot(update("Spent 2000 on food", 3)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(store.is_empty());

        let mut req = update("Spent 2000 on food", 3);
        req.headers_mut()
            .insert(SECRET_HEADER, "s3cret".parse().unwrap());
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(store.len(), 1);
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_health() {
        let store = Arc::new(MemoryLedger::new());
        let app = create_router(state(store, Arc::new(RecordingMessenger::default()), None));

        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "OK");
    }
}
