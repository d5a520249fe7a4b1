// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Persistence for the two board documents.

use async_trait::async_trait;
use statusboard_model::{BoardState, UrgentMessage};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub const CRATE_NAME: &str = "statusboard-store";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Whole-document access to the board.
///
/// Loads never fail: an unreadable or malformed document is replaced by its
/// default (the initial board, an empty message list).
#[async_trait]
pub trait BoardStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn load_state(&self, now: i64) -> BoardState;

    async fn save_state(&self, state: &BoardState) -> Result<(), StoreError>;

    async fn load_urgent(&self) -> Vec<UrgentMessage>;

    async fn save_urgent(&self, messages: &[UrgentMessage]) -> Result<(), StoreError>;

    /// Probe used by readiness checks; `Ok` when documents are readable or absent.
    async fn check_readable(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
