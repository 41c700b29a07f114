// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::Request;
use super::response::Response;
use super::{DEFAULT_FORM_CONTENT_TYPE, DEFAULT_TIMEOUT};
use crate::error::Result;

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Timeout covering the whole exchange
    pub timeout: Duration,
    /// Proxy URL; unparsable values are ignored
    pub proxy: Option<String>,
    /// Accept any server certificate.
    ///
    /// On by default: the sites this crate targets routinely serve broken
    /// or self-signed chains.
    pub accept_invalid_certs: bool,
    /// Let the transport negotiate and inflate gzip itself.
    ///
    /// Off by default, so the decoder sees the raw body and the
    /// `Content-Encoding` header.
    pub auto_decompress: bool,
    /// User agent string, none sent when unset
    pub user_agent: Option<String>,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            accept_invalid_certs: true,
            auto_decompress: false,
            user_agent: None,
            max_redirects: 10,
        }
    }
}

impl TransportConfig {
    /// Create a new transport config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set proxy. An empty string clears it.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        let proxy = proxy.into();
        self.proxy = if proxy.is_empty() { None } else { Some(proxy) };
        self
    }

    /// Toggle certificate verification bypass
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Toggle transport-level gzip
    pub fn auto_decompress(mut self, enabled: bool) -> Self {
        self.auto_decompress = enabled;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }
}

/// Something that can carry a [`Request`] to a server and hand back the
/// unread [`Response`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request. Transport failures are returned as is, never retried.
    async fn send(&self, request: Request) -> Result<Response>;
}

/// Transport backed by reqwest.
///
/// Every call builds its own client with an empty cookie jar and no idle
/// pool, and drops it once the response headers are in.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    config: TransportConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn build_client(&self, request: &Request) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(request.timeout.unwrap_or(self.config.timeout))
            .redirect(Policy::limited(self.config.max_redirects))
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .gzip(self.config.auto_decompress)
            .cookie_store(true)
            .pool_max_idle_per_host(0);

        if let Some(ref user_agent) = self.config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let proxy_url = request
            .proxy
            .as_deref()
            .or(self.config.proxy.as_deref())
            .filter(|p| !p.is_empty());

        builder = match proxy_url.map(|url| (url, reqwest::Proxy::all(url))) {
            Some((url, Ok(proxy))) => {
                tracing::debug!(proxy = %url, "Routing through proxy");
                builder.proxy(proxy)
            }
            Some((url, Err(e))) => {
                tracing::warn!(proxy = %url, error = %e, "Ignoring unparsable proxy URL");
                builder.no_proxy()
            }
            None => builder.no_proxy(),
        };

        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let client = self.build_client(&request)?;

        // Defaults first, caller headers replace them
        let mut headers = HeaderMap::new();
        if request.has_payload() {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(DEFAULT_FORM_CONTENT_TYPE),
            );
        }
        for (name, value) in request.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let has_payload = request.has_payload();
        let mut builder = client
            .request(request.method.clone(), request.url.clone())
            .headers(headers);
        if has_payload {
            if let Some(body) = request.body {
                builder = builder.body(body);
            }
        }

        tracing::debug!(method = %request.method, url = %request.url, "Request");
        let response = builder.send().await?;
        tracing::debug!(
            url = %response.url(),
            status = %response.status(),
            "Response"
        );

        Ok(Response::from_reqwest(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let transport = ReqwestTransport::new();
        let config = transport.config();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.accept_invalid_certs);
        assert!(!config.auto_decompress);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = TransportConfig::new()
            .timeout(Duration::from_secs(3))
            .proxy("")
            .user_agent("charfetch-test")
            .max_redirects(2);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.proxy.is_none());
        assert_eq!(config.user_agent.as_deref(), Some("charfetch-test"));
        assert_eq!(config.max_redirects, 2);
    }

    #[test]
    fn test_certificate_checks_follow_config() {
        let request = Request::get("https://self-signed.example.com").unwrap();

        // the one-call helpers use the default transport, which skips checks
        let lenient = ReqwestTransport::new();
        assert!(lenient.config().accept_invalid_certs);
        assert!(lenient.build_client(&request).is_ok());

        let strict =
            ReqwestTransport::with_config(TransportConfig::new().accept_invalid_certs(false));
        assert!(!strict.config().accept_invalid_certs);
        assert!(strict.build_client(&request).is_ok());
    }

    #[test]
    fn test_bad_proxy_is_ignored() {
        let transport = ReqwestTransport::with_config(TransportConfig::new().proxy("::bad::"));
        let request = Request::get("http://example.com").unwrap();
        assert!(transport.build_client(&request).is_ok());
    }
}
