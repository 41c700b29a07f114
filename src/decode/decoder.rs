// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response body to text

use std::fmt;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

use bytes::Bytes;
use flate2::read::MultiGzDecoder;
use reqwest::StatusCode;

use super::charset::{detect_charset, CharsetPolicy, GbkFallbackPolicy};
use super::peek::PeekReader;
use super::transcode::{EncodingRsTranscoder, Transcoder};
use crate::error::{Error, Result};
use crate::http::Response;

/// Size of the reads used to inflate gzip bodies
pub const GZIP_CHUNK: usize = 1024;

/// Decodes response bodies into UTF-8 text.
///
/// The charset heuristics and the transcoding step are both swappable.
#[derive(Clone)]
pub struct ResponseDecoder {
    policy: Arc<dyn CharsetPolicy>,
    transcoder: Arc<dyn Transcoder>,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self {
            policy: Arc::new(GbkFallbackPolicy),
            transcoder: Arc::new(EncodingRsTranscoder),
        }
    }
}

impl fmt::Debug for ResponseDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseDecoder").finish_non_exhaustive()
    }
}

impl ResponseDecoder {
    /// Create a decoder with the GBK fallback policy and encoding_rs
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the charset policy
    pub fn with_policy(mut self, policy: impl CharsetPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Replace the transcoder
    pub fn with_transcoder(mut self, transcoder: impl Transcoder + 'static) -> Self {
        self.transcoder = Arc::new(transcoder);
        self
    }

    /// Read the whole response and decode it.
    ///
    /// `charset`, when given and non-empty, wins over whatever is sniffed.
    /// The response is consumed, so its body is released on every path.
    pub async fn decode(&self, response: Response, charset: Option<&str>) -> Result<String> {
        let status = response.status;
        let url = response.url_str().map(str::to_string);
        let gzipped = response.content_encoding() == Some("gzip");

        let raw = response.into_body_bytes().await?;
        let body = if gzipped && !raw.is_empty() {
            inflate(&raw)?
        } else {
            raw
        };

        self.decode_bytes(status, url, body, charset)
    }

    /// Decode an already-read body
    pub fn decode_bytes(
        &self,
        status: StatusCode,
        url: Option<String>,
        body: Bytes,
        charset: Option<&str>,
    ) -> Result<String> {
        if body.is_empty() {
            return Err(Error::EmptyBody);
        }
        if !status.is_success() {
            return Err(Error::status(status.as_u16(), url));
        }

        let mut source = PeekReader::new(Cursor::new(body));
        let detected = detect_charset(&mut source, self.policy.as_ref());
        let resolved = match charset {
            Some(charset) if !charset.is_empty() => charset.to_string(),
            _ => detected,
        };
        let resolved = self.policy.coerce(&resolved);
        tracing::debug!(charset = %resolved, "Decoding body");

        let mut text = self.transcoder.transcode(&resolved, &mut source)?;

        // Whatever the transcoder left in the underlying buffer is appended
        // as is. After a full transcode this is empty.
        let mut rest = Vec::new();
        source.into_inner().read_to_end(&mut rest)?;
        if !rest.is_empty() {
            text.push_str(&String::from_utf8_lossy(&rest));
        }

        Ok(text)
    }
}

/// Inflate every gzip member of a body in [`GZIP_CHUNK`] reads
pub fn inflate(compressed: &[u8]) -> Result<Bytes> {
    let mut decoder = MultiGzDecoder::new(compressed);
    let mut out = Vec::with_capacity(compressed.len() * 4);
    let mut buf = [0u8; GZIP_CHUNK];

    loop {
        match decoder.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Decompress(e)),
        }
    }

    tracing::trace!(compressed = compressed.len(), inflated = out.len(), "Inflated gzip body");
    Ok(Bytes::from(out))
}
