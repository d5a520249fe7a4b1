// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use statusboard_model::{BoardState, UrgentMessage};
use std::sync::Mutex;

use crate::{BoardStore, StoreError};

/// In-process store; `fail_writes` simulates a read-only disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<BoardState>>,
    urgent: Mutex<Vec<UrgentMessage>>,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn with_documents(state: Option<BoardState>, urgent: Vec<UrgentMessage>) -> Self {
        Self {
            state: Mutex::new(state),
            urgent: Mutex::new(urgent),
            fail_writes: false,
        }
    }

    #[must_use]
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            Err(StoreError("memory store is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn load_state(&self, now: i64) -> BoardState {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.clone())
            .unwrap_or_else(|| BoardState::initial(now))
    }

    async fn save_state(&self, state: &BoardState) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut lock = self
            .state
            .lock()
            .map_err(|_| StoreError("state lock poisoned".to_string()))?;
        *lock = Some(state.clone());
        Ok(())
    }

    async fn load_urgent(&self) -> Vec<UrgentMessage> {
        self.urgent.lock().map(|m| m.clone()).unwrap_or_default()
    }

    async fn save_urgent(&self, messages: &[UrgentMessage]) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut lock = self
            .urgent
            .lock()
            .map_err(|_| StoreError("urgent lock poisoned".to_string()))?;
        *lock = messages.to_vec();
        Ok(())
    }
}
