// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! One-call fetch helpers
//!
//! Each helper builds its own transport, so calls share nothing and can run
//! concurrently from any number of tasks.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::decode::ResponseDecoder;
use crate::error::Result;
use crate::http::{ReqwestTransport, Request, Response, Transport, DEFAULT_TIMEOUT, HEADER_TIMEOUT};

pub use crate::http::url_encode;

/// GET `url` and decode the body
pub async fn fetch_text(url: &str) -> Result<String> {
    let response = dispatch(url, None, "GET", None, DEFAULT_TIMEOUT, "").await?;
    decode_text(response).await
}

/// GET `url` and return the unread response
pub async fn fetch_response(url: &str) -> Result<Response> {
    dispatch(url, None, "GET", None, DEFAULT_TIMEOUT, "").await
}

/// GET `url` with extra headers and return the unread response
pub async fn fetch_response_with_headers(
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<Response> {
    dispatch(url, Some(headers), "GET", None, HEADER_TIMEOUT, "").await
}

/// GET `url` with extra headers and decode the body
pub async fn fetch_text_with_headers(url: &str, headers: &HashMap<String, String>) -> Result<String> {
    let response = dispatch(url, Some(headers), "GET", None, DEFAULT_TIMEOUT, "").await?;
    decode_text(response).await
}

/// Send an arbitrary request and decode the body.
///
/// `body` is only sent for POST and PUT.
pub async fn fetch_text_with(
    url: &str,
    headers: Option<&HashMap<String, String>>,
    method: &str,
    body: Option<&[u8]>,
    timeout: Duration,
) -> Result<String> {
    let response = dispatch(url, headers, method, body, timeout, "").await?;
    decode_text(response).await
}

/// Send an arbitrary request and return the unread response
pub async fn send_request(
    url: &str,
    headers: Option<&HashMap<String, String>>,
    method: &str,
    body: Option<&[u8]>,
    timeout: Duration,
) -> Result<Response> {
    dispatch(url, headers, method, body, timeout, "").await
}

/// Like [`send_request`], routed through `proxy`.
///
/// An empty or unparsable proxy URL means a direct connection.
pub async fn send_request_with_proxy(
    url: &str,
    headers: Option<&HashMap<String, String>>,
    method: &str,
    body: Option<&[u8]>,
    timeout: Duration,
    proxy: &str,
) -> Result<Response> {
    dispatch(url, headers, method, body, timeout, proxy).await
}

/// Decode a response with the sniffed charset
pub async fn decode_text(response: Response) -> Result<String> {
    ResponseDecoder::new().decode(response, None).await
}

/// Decode a response, forcing `charset` when it is non-empty
pub async fn decode_text_with_charset(response: Response, charset: &str) -> Result<String> {
    ResponseDecoder::new().decode(response, Some(charset)).await
}

/// Send `request` over any transport and decode the answer
pub async fn fetch_with<T: Transport + ?Sized>(
    transport: &T,
    decoder: &ResponseDecoder,
    request: Request,
    charset: Option<&str>,
) -> Result<String> {
    let response = transport.send(request).await?;
    decoder.decode(response, charset).await
}

async fn dispatch(
    url: &str,
    headers: Option<&HashMap<String, String>>,
    method: &str,
    body: Option<&[u8]>,
    timeout: Duration,
    proxy: &str,
) -> Result<Response> {
    let mut request = Request::new(method, url)?.timeout(timeout).proxy(proxy);
    if let Some(headers) = headers {
        request = request.headers(headers)?;
    }
    if let Some(body) = body {
        request = request.body(Bytes::copy_from_slice(body));
    }
    ReqwestTransport::new().send(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::header::HeaderMap;
    use reqwest::{Method, StatusCode};

    /// Records what it was asked to send and answers with a canned body
    struct FakeTransport {
        seen: Mutex<Vec<(Method, String)>>,
        status: StatusCode,
        body: &'static [u8],
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: Request) -> Result<Response> {
            self.seen
                .lock()
                .push((request.method.clone(), request.url_str().to_string()));
            Ok(Response::from_parts(self.status, HeaderMap::new(), self.body))
        }
    }

    #[tokio::test]
    async fn test_fetch_with_fake_transport() {
        let transport = FakeTransport {
            seen: Mutex::new(Vec::new()),
            status: StatusCode::OK,
            body: "你好".as_bytes(),
        };
        let request = Request::new("post", "http://fake.test/form").unwrap();

        let text = fetch_with(&transport, &ResponseDecoder::new(), request, None)
            .await
            .unwrap();
        assert_eq!(text, "你好");
        assert_eq!(
            transport.seen.lock().as_slice(),
            &[(Method::POST, "http://fake.test/form".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_with_status_error() {
        let transport = FakeTransport {
            seen: Mutex::new(Vec::new()),
            status: StatusCode::BAD_GATEWAY,
            body: b"upstream down",
        };
        let request = Request::get("http://fake.test/").unwrap();

        let err = fetch_with(&transport, &ResponseDecoder::new(), request, None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(502));
    }

    #[tokio::test]
    async fn test_malformed_url_fails_before_network() {
        let err = fetch_text("definitely not a url").await.unwrap_err();
        assert!(err.is_transport());
    }
}
