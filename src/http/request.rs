// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request descriptor

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::error::{Error, Result};

/// A single outgoing request, owned by the call that sends it
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method, always upper case
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Caller headers, applied last so they win over defaults
    pub headers: HeaderMap,
    /// Request body (only sent for POST and PUT)
    pub body: Option<Bytes>,
    /// Per-request timeout, overrides the transport default
    pub timeout: Option<Duration>,
    /// Per-request proxy URL, overrides the transport default
    pub proxy: Option<String>,
}

impl Request {
    /// Create a GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new("GET", url)
    }

    /// Create a request with a case-insensitive method name.
    ///
    /// An empty method means GET.
    pub fn new(method: impl AsRef<str>, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method: parse_method(method.as_ref())?,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            proxy: None,
        })
    }

    /// Set a header, replacing any previous value under the same name
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        let invalid = || Error::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::try_from(name).map_err(|_| invalid())?;
        let header_value = HeaderValue::try_from(value.as_ref()).map_err(|_| invalid())?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: &HashMap<String, String>) -> Result<Self> {
        for (name, value) in headers {
            self = self.header(name, value)?;
        }
        Ok(self)
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route this request through a proxy. An empty string clears it.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        let proxy = proxy.into();
        self.proxy = if proxy.is_empty() { None } else { Some(proxy) };
        self
    }

    /// Whether the body goes on the wire: it must be present and the
    /// method must be POST or PUT.
    pub fn has_payload(&self) -> bool {
        self.body.is_some() && (self.method == Method::POST || self.method == Method::PUT)
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

fn parse_method(method: &str) -> Result<Method> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    let upper = method.to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).map_err(|_| Error::InvalidMethod(method.to_string()))
}

/// Percent-encode a query value.
///
/// Letters, digits and `-_.~` pass through, space becomes `+`, every other
/// byte becomes `%XX`.
pub fn url_encode(keyword: &str) -> String {
    let mut result = String::with_capacity(keyword.len());
    for byte in keyword.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char)
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{:02X}", byte)),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = Request::new("post", "https://example.com/path").unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.host_str(), Some("example.com"));
        assert!(req.timeout.is_none());
    }

    #[test]
    fn test_empty_method_is_get() {
        let req = Request::new("", "https://example.com").unwrap();
        assert_eq!(req.method, Method::GET);
    }

    #[test]
    fn test_invalid_method() {
        let err = Request::new("GE T", "https://example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidMethod(_)));
    }

    #[test]
    fn test_invalid_url() {
        let err = Request::get("::not a url").unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_request_headers() {
        let req = Request::get("https://example.com")
            .unwrap()
            .header("X-Custom", "value")
            .unwrap()
            .header("x-custom", "other")
            .unwrap();
        assert_eq!(req.headers.len(), 1);
        assert_eq!(
            req.headers.get("x-custom").map(|v| v.to_str().unwrap()),
            Some("other")
        );
    }

    #[test]
    fn test_invalid_header_name() {
        let err = Request::get("https://example.com")
            .unwrap()
            .header("bad header", "v")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { .. }));
    }

    #[test]
    fn test_payload_only_for_post_and_put() {
        let get = Request::get("https://example.com").unwrap().body("a=1");
        assert!(!get.has_payload());

        let put = Request::new("put", "https://example.com").unwrap().body("a=1");
        assert!(put.has_payload());

        let post = Request::new("POST", "https://example.com").unwrap();
        assert!(!post.has_payload());
    }

    #[test]
    fn test_empty_proxy_clears() {
        let req = Request::get("https://example.com").unwrap().proxy("");
        assert!(req.proxy.is_none());
    }

    #[test]
    fn test_url_encode() {
        assert_eq!(url_encode("a b&c"), "a+b%26c");
        assert_eq!(url_encode("safe-_.~"), "safe-_.~");
        assert_eq!(url_encode("中"), "%E4%B8%AD");
        assert_eq!(url_encode("a*b/c"), "a%2Ab%2Fc");
    }
}
