// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for charfetch
//!
//! Every exchange gets its own client, its own cookie jar and its own
//! connection pool. Nothing survives between calls.

mod client;
mod request;
mod response;

use std::time::Duration;

pub use client::{ReqwestTransport, Transport, TransportConfig};
pub use request::{url_encode, Request};
pub use response::Response;

/// Timeout of the plain fetch helpers
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout of the header-carrying raw response fetch
pub const HEADER_TIMEOUT: Duration = Duration::from_secs(60);

/// Content type set on POST/PUT payloads unless the caller overrides it
pub const DEFAULT_FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; param=value";

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const CONTENT_ENCODING: &str = "content-encoding";
}
