// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use statusboard_model::{BoardState, UrgentMessage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub location: String,
    pub note: String,
    pub since: i64,
    pub server_time: i64,
    pub stale_after_min: u64,
    pub urgent: Option<UrgentMessage>,
}

impl StatusResponse {
    #[must_use]
    pub fn new(
        state: BoardState,
        server_time: i64,
        stale_after_min: u64,
        urgent: Option<UrgentMessage>,
    ) -> Self {
        Self {
            status: state.status,
            location: state.location,
            note: state.note,
            since: state.since,
            server_time,
            stale_after_min,
            urgent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgentListResponse {
    pub urgent: Vec<UrgentMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitUrgentResponse {
    pub ok: bool,
    pub id: u64,
}

impl SubmitUrgentResponse {
    #[must_use]
    pub fn accepted(id: u64) -> Self {
        Self { ok: true, id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl AckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            ok: true,
            msg: None,
        }
    }
}
