// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for charfetch
//!
//! Every failure propagates straight to the caller. Nothing in this crate
//! retries, so there is no notion of a "recoverable" error here.

use thiserror::Error;

/// Result type alias for charfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for charfetch
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure: DNS, connect, TLS handshake, timeout, body read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Method string is not a valid HTTP token
    #[error("Invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// Caller-supplied header could not be encoded
    #[error("Invalid header: {name:?}")]
    InvalidHeader { name: String },

    /// Response status outside [200, 300)
    #[error("Unexpected status code: {status}")]
    Status { status: u16, url: Option<String> },

    /// No byte content left to decode
    #[error("Response body is empty")]
    EmptyBody,

    /// Gzip header or stream was corrupt
    #[error("Gzip decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a status error
    pub fn status(status: u16, url: Option<String>) -> Self {
        Error::Status { status, url }
    }

    /// Check if this is an HTTP status error
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status { .. })
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Url(_) | Error::InvalidMethod(_) | Error::InvalidHeader { .. }
        )
    }

    /// Check if the transport gave up on the timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Status { url: Some(u), .. } => Some(u),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}
