// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use super::headers;
use crate::error::Result;

/// HTTP response whose body has not been read yet.
///
/// Reading the body consumes the response, so the underlying connection is
/// released exactly once whichever way the caller leaves.
#[derive(Debug)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL (after redirects), if the response came off the wire
    pub url: Option<Url>,
    body: Body,
}

#[derive(Debug)]
enum Body {
    /// Live transport stream
    Stream(reqwest::Response),
    /// Already in memory
    Buffered(Bytes),
}

impl Response {
    /// Create a response from in-memory parts
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            url: None,
            body: Body::Buffered(body.into()),
        }
    }

    /// Wrap a live reqwest response without touching its body
    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: Some(response.url().clone()),
            body: Body::Stream(response),
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// First `Content-Encoding` value, as sent
    pub fn content_encoding(&self) -> Option<&str> {
        self.header(headers::CONTENT_ENCODING)
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(headers::CONTENT_TYPE)
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> Option<&str> {
        self.url.as_ref().map(Url::as_str)
    }

    /// Read the whole body, consuming the response
    pub async fn into_body_bytes(self) -> Result<Bytes> {
        match self.body {
            Body::Stream(response) => Ok(response.bytes().await?),
            Body::Buffered(bytes) => Ok(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_response_status() {
        let resp = Response::from_parts(StatusCode::OK, HeaderMap::new(), Bytes::new());
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
        assert!(resp.url_str().is_none());
    }

    #[test]
    fn test_content_encoding_first_value() {
        let mut headers = HeaderMap::new();
        headers.append("content-encoding", HeaderValue::from_static("gzip"));
        headers.append("content-encoding", HeaderValue::from_static("identity"));
        let resp = Response::from_parts(StatusCode::OK, headers, "x");
        assert_eq!(resp.content_encoding(), Some("gzip"));
    }

    #[tokio::test]
    async fn test_buffered_body() {
        let resp = Response::from_parts(StatusCode::OK, HeaderMap::new(), "Hello, World!");
        let body = resp.into_body_bytes().await.unwrap();
        assert_eq!(&body[..], b"Hello, World!");
    }
}
