// SPDX-License-Identifier: Apache-2.0

pub(crate) mod audit;
pub(crate) mod request_tracing;
