// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # charfetch - fetch web pages as UTF-8 text
//!
//! Small HTTP helpers for scraping pages that are not always UTF-8.
//!
//! ## Features
//!
//! - One call per fetch: GET/POST/PUT, extra headers, optional proxy
//! - Charset sniffing over the first kilobyte (BOM, `<meta>`, UTF-8 check)
//! - GBK recovery: a windows-1252 guess is read as GBK unless the page says UTF-8
//! - Gzip bodies inflated even when the transport did not ask for them
//! - Certificate verification off by default, see [`TransportConfig`]
//! - Fresh client, cookie jar and connection pool per call
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let page = charfetch::fetch_text("https://example.com").await?;
//!     println!("{page}");
//!
//!     let mut headers = HashMap::new();
//!     headers.insert("Referer".to_string(), "https://example.com".to_string());
//!     let query = charfetch::url_encode("rust 编程");
//!     let url = format!("https://example.com/search?q={query}");
//!     let results = charfetch::fetch_text_with_headers(&url, &headers).await?;
//!     println!("{results}");
//!
//!     Ok(())
//! }
//! ```

pub mod decode;
pub mod error;
pub mod fetch;
pub mod http;

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{ReqwestTransport, Request, Response, Transport, TransportConfig};
pub use http::{DEFAULT_FORM_CONTENT_TYPE, DEFAULT_TIMEOUT, HEADER_TIMEOUT};

// Decoding
pub use decode::{CharsetPolicy, EncodingRsTranscoder, GbkFallbackPolicy, PassthroughPolicy};
pub use decode::{PeekReader, ResponseDecoder, Transcoder};

// One-call helpers
pub use fetch::{
    decode_text, decode_text_with_charset, fetch_response, fetch_response_with_headers,
    fetch_text, fetch_text_with, fetch_text_with_headers, fetch_with, send_request,
    send_request_with_proxy, url_encode,
};

/// charfetch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
