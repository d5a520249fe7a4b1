// SPDX-License-Identifier: Apache-2.0

use statusboard_api::StatusResponse;
use statusboard_core::Clock;
use statusboard_model::{
    active_messages, latest_active, next_message_id, ActivityWindow, BoardState, StatusUpdate,
    UrgentMessage, UrgentSubmission,
};
use statusboard_store::{BoardStore, StoreError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    MessageNotFound(u64),
    IdSpaceExhausted,
    Store(StoreError),
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MessageNotFound(id) => write!(f, "urgent message {id} not found"),
            Self::IdSpaceExhausted => f.write_str("urgent message ids exhausted"),
            Self::Store(e) => write!(f, "store failure: {e}"),
        }
    }
}

impl std::error::Error for BoardError {}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Read-modify-write access to the board documents.
///
/// Mutations hold `write_lock` across their load and save so concurrent
/// requests never interleave; reads go straight to the store.
pub struct BoardService {
    store: Arc<dyn BoardStore>,
    clock: Arc<dyn Clock>,
    window: ActivityWindow,
    write_lock: Mutex<()>,
}

impl BoardService {
    #[must_use]
    pub fn new(store: Arc<dyn BoardStore>, clock: Arc<dyn Clock>, window: ActivityWindow) -> Self {
        Self {
            store,
            clock,
            window,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn window(&self) -> ActivityWindow {
        self.window
    }

    #[must_use]
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    #[must_use]
    pub fn backend_tag(&self) -> &'static str {
        self.store.backend_tag()
    }

    pub async fn status(&self) -> StatusResponse {
        let now = self.clock.now();
        let state = self.store.load_state(now).await;
        let messages = self.store.load_urgent().await;
        let urgent = latest_active(&messages, now, self.window);
        StatusResponse::new(state, now, self.window.minutes(), urgent)
    }

    pub async fn active_urgent(&self) -> Vec<UrgentMessage> {
        let now = self.clock.now();
        let messages = self.store.load_urgent().await;
        active_messages(&messages, now, self.window)
    }

    pub async fn submit_urgent(&self, submission: UrgentSubmission) -> Result<u64, BoardError> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let mut messages = self.store.load_urgent().await;
        let id = next_message_id(&messages).ok_or(BoardError::IdSpaceExhausted)?;
        messages.push(UrgentMessage::from_submission(id, submission, now));
        self.store.save_urgent(&messages).await?;
        info!(id, "urgent message stored");
        Ok(id)
    }

    pub async fn reply(&self, id: u64, text: String) -> Result<(), BoardError> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let mut messages = self.store.load_urgent().await;
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(BoardError::MessageNotFound(id))?;
        message.set_reply(text, now);
        self.store.save_urgent(&messages).await?;
        info!(id, "urgent message answered");
        Ok(())
    }

    pub async fn set_status(&self, update: StatusUpdate) -> Result<BoardState, BoardError> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let mut state = self.store.load_state(now).await;
        state.apply(update, now);
        self.store.save_state(&state).await?;
        info!(status = %state.status, location = %state.location, "board status updated");
        Ok(state)
    }

    pub async fn check_ready(&self) -> Result<(), StoreError> {
        self.store.check_readable().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusboard_core::ManualClock;
    use statusboard_store::MemoryStore;

    fn service(clock: Arc<ManualClock>) -> BoardService {
        BoardService::new(
            Arc::new(MemoryStore::default()),
            clock,
            ActivityWindow::default(),
        )
    }

    fn submission(text: &str) -> UrgentSubmission {
        UrgentSubmission::normalized(None, Some(text), None, None)
    }

    #[tokio::test]
    async fn status_reports_most_recent_active_message() {
        let clock = Arc::new(ManualClock::new(1_000));
        let board = service(clock.clone());
        assert_eq!(board.submit_urgent(submission("first")).await, Ok(1));
        clock.advance(10);
        assert_eq!(board.submit_urgent(submission("second")).await, Ok(2));

        let status = board.status().await;
        assert_eq!(status.server_time, 1_010);
        assert_eq!(status.stale_after_min, 20);
        assert_eq!(status.urgent.map(|m| m.text), Some("second".to_string()));

        clock.advance(20 * 60 + 1);
        assert!(board.status().await.urgent.is_none());
        assert!(board.active_urgent().await.is_empty());
    }

    #[tokio::test]
    async fn ids_keep_increasing_after_messages_expire() {
        let clock = Arc::new(ManualClock::new(0));
        let board = service(clock.clone());
        board.submit_urgent(submission("a")).await.expect("submit");
        clock.advance(3_600);
        assert_eq!(board.submit_urgent(submission("b")).await, Ok(2));
    }

    #[tokio::test]
    async fn reply_overwrites_and_reports_missing_ids() {
        let clock = Arc::new(ManualClock::new(50));
        let board = service(clock.clone());
        board.submit_urgent(submission("help")).await.expect("submit");
        board.reply(1, "on my way".to_string()).await.expect("reply");
        clock.advance(5);
        board.reply(1, "here".to_string()).await.expect("reply again");
        let reply = board.active_urgent().await[0].reply.clone().expect("reply");
        assert_eq!((reply.text.as_str(), reply.time), ("here", 55));

        assert_eq!(
            board.reply(9, "x".to_string()).await,
            Err(BoardError::MessageNotFound(9))
        );
    }

    #[tokio::test]
    async fn concurrent_submissions_get_distinct_ids() {
        let clock = Arc::new(ManualClock::new(0));
        let board = Arc::new(service(clock));
        let mut tasks = Vec::new();
        for i in 0..16 {
            let board = board.clone();
            tasks.push(tokio::spawn(async move {
                board.submit_urgent(submission(&format!("m{i}"))).await
            }));
        }
        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.expect("join").expect("submit"));
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn submit_refuses_when_ids_run_out() {
        let existing = UrgentMessage::from_submission(u64::MAX, submission("last"), 0);
        let store = Arc::new(MemoryStore::with_documents(None, vec![existing]));
        let board = BoardService::new(
            store.clone(),
            Arc::new(ManualClock::new(10)),
            ActivityWindow::default(),
        );
        assert_eq!(
            board.submit_urgent(submission("one more")).await,
            Err(BoardError::IdSpaceExhausted)
        );
        assert_eq!(store.load_urgent().await.len(), 1);
    }

    #[tokio::test]
    async fn store_failures_surface_as_errors() {
        let board = BoardService::new(
            Arc::new(MemoryStore::failing_writes()),
            Arc::new(ManualClock::new(0)),
            ActivityWindow::default(),
        );
        assert!(matches!(
            board.submit_urgent(submission("x")).await,
            Err(BoardError::Store(_))
        ));
        assert!(matches!(
            board.set_status(StatusUpdate::default()).await,
            Err(BoardError::Store(_))
        ));
    }
}
