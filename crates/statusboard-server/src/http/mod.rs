// SPDX-License-Identifier: Apache-2.0

pub(crate) mod board_endpoints;
pub(crate) mod ops;
pub(crate) mod pages;
pub(crate) mod request_tracing;
pub(crate) mod response_contract;
pub(crate) mod router;
