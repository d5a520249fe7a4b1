// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod dto;
mod error_mapping;
mod errors;
pub mod openapi;
mod params;

pub use dto::{AckResponse, StatusResponse, SubmitUrgentResponse, UrgentListResponse};
pub use error_mapping::{map_error, status_for, ApiErrorMapping, API_ERROR_SCHEMA_REF};
pub use errors::{ApiError, ApiErrorCode};
pub use openapi::openapi_spec;
pub use params::{
    parse_pin, parse_reply_request, parse_status_request, parse_urgent_form, ReplyRequest,
};

pub const CRATE_NAME: &str = "statusboard-api";
pub const API_VERSION: &str = "v1";

const _: fn() = || {
    fn assert_traits<T: serde::Serialize + for<'de> serde::Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
    assert_traits::<StatusResponse>();
};
